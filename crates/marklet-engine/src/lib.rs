//! # marklet-engine
//!
//! The full marklet pipeline: source text is tokenized and parsed by
//! [`marklet_syntax`], then rendered to HTML by [`HtmlRenderer`].
//!
//! ```
//! use marklet_engine::{compile, to_html, RenderOptions};
//!
//! assert_eq!(to_html("**bold** move"), "<p><strong>bold</strong> move</p>");
//!
//! let compiled = compile("> quoted", &RenderOptions::default());
//! assert_eq!(compiled.html, "<blockquote><p>quoted</p></blockquote>");
//! assert_eq!(compiled.tree.error_count(), 0);
//! ```

pub mod html;
pub mod options;

use serde::Serialize;

pub use html::HtmlRenderer;
pub use marklet_syntax::{Node, Style, Token, TokenKind};
pub use options::RenderOptions;

/// Every stage's output for one source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compiled {
    pub tokens: Vec<Token>,
    pub tree: Node,
    pub html: String,
}

/// Tokenize, parse and render `source`.
pub fn compile(source: &str, options: &RenderOptions) -> Compiled {
    let tokens = marklet_syntax::tokenize(source);
    let tree = marklet_syntax::parse(&tokens);
    let html = HtmlRenderer::new(options).render(&tree);

    log::debug!(
        "compiled {} bytes into {} tokens, {} errors",
        source.len(),
        tokens.len(),
        tree.error_count()
    );

    Compiled { tokens, tree, html }
}

/// Render `source` to HTML with default options.
pub fn to_html(source: &str) -> String {
    let tree = marklet_syntax::parse_str(source);
    HtmlRenderer::new(&RenderOptions::default()).render(&tree)
}
