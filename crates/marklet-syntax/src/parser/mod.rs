//! # Parser - Recursive Descent With Block Recovery
//!
//! This module turns the token stream into an owned [`Node`] tree.
//!
//! ## Structure
//!
//! Grammar rules are plain functions taking a [`TokenCursor`]:
//!
//! - Block rules return `Result<Node, ParseError>` and use `?` on every
//!   structural expectation (`|` delimiters, sentinels, separator dashes).
//! - Inline rules are infallible. An unterminated or unknown delimiter
//!   degrades to literal text, so inline markup can never fail a block.
//!
//! ## Error Recovery
//!
//! The document loop is the only place a [`ParseError`] is handled. When a
//! block fails, the loop skips through the next newline and records
//! everything the failed block consumed as a [`Node::Error`]:
//!
//! ```
//! use marklet_syntax::{parse_str, Node};
//!
//! let doc = parse_str("| a |\nnot a separator\nafter\n");
//! let Node::Document { children } = doc else { unreachable!() };
//! assert!(children[0].is_error());
//! assert_eq!(children[1].plain_text(), "after");
//! ```
//!
//! ## Module Structure
//!
//! - [`cursor`] - `TokenCursor` and `Matcher`
//! - [`error`] - `ParseError`
//! - `grammar` - document, block and inline rules

pub mod cursor;
pub mod error;

mod grammar;

use crate::lexer::tokenize;
use crate::token::Token;
use crate::tree::Node;

pub use cursor::{Matcher, TokenCursor};
pub use error::ParseError;

/// Parse a token stream into a `Document` node. Never fails.
pub fn parse(tokens: &[Token]) -> Node {
    let mut cursor = TokenCursor::new(tokens);
    grammar::document(&mut cursor)
}

/// Tokenize and parse source text.
pub fn parse_str(source: &str) -> Node {
    parse(&tokenize(source))
}
