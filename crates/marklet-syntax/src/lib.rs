//! # marklet-syntax
//!
//! Tokenizer and error-tolerant parser for the marklet markup dialect, a
//! small markdown-like language with headers, tables, block quotes, indented
//! code, nested lists and delimiter-based inline styles.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → TokenCursor → Grammar → Node tree
//!               (line state)     (lookahead)    (recursive descent)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! The lexer walks the input line by line and decides block structure:
//! which quotes and lists open or close, and which lines are code. It emits
//! balanced sentinel tokens for those, and one `TEXT` token per remaining
//! character.
//!
//! ```text
//! "> hi\n" → [BLOCK_QUOTE, TEXT("h"), TEXT("i"), TEXT("\n"), END_BLOCK_QUOTE]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Grammar rules read tokens through a [`TokenCursor`]. Block rules fail
//! with a [`ParseError`] on malformed structure; the document loop turns the
//! failed block into a [`Node::Error`] and continues with the next line.
//! Inline rules never fail: unmatched delimiters stay literal text.
//!
//! ### 3. Tree ([`tree`] module)
//!
//! The result is an owned [`Node`] tree with a fixed set of variants.
//! Rendering lives in `marklet-engine`.
//!
//! ## Module Structure
//!
//! ```text
//! marklet-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── token.rs         # TokenKind, Token and payloads
//! ├── lexer.rs         # Line-oriented tokenizer
//! ├── tree.rs          # Node and Style
//! └── parser/
//!     ├── mod.rs       # parse() and parse_str()
//!     ├── cursor.rs    # TokenCursor and Matcher
//!     ├── error.rs     # ParseError
//!     └── grammar/
//!         ├── mod.rs   # Document loop and error recovery
//!         ├── block.rs # Headers, tables, quotes, code, lists, paragraphs
//!         └── inline.rs# Plain text and styles
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use marklet_syntax::{parse_str, Node, Style};
//!
//! let doc = parse_str("# Hello *world*\n");
//!
//! let Node::Document { children } = &doc else { unreachable!() };
//! let Node::Header { level, children } = &children[0] else { unreachable!() };
//! assert_eq!(*level, 1);
//! assert!(matches!(children[1], Node::Style { style: Style::Emphasis, .. }));
//! assert_eq!(doc.plain_text(), "Hello world");
//! ```

pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;

pub use lexer::{LexState, tokenize};
pub use parser::{Matcher, ParseError, TokenCursor, parse, parse_str};
pub use token::{EOF_TOKEN, ListFrame, Payload, Token, TokenKind};
pub use tree::{Node, Style};
