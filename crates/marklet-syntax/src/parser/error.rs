//! Structural parse errors.

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// A block-level construct did not find the token it required.
///
/// Raised by [`TokenCursor::expect`](super::cursor::TokenCursor::expect) and
/// by grammar rules; caught once per block by the document loop, which turns
/// the failed block into an error node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at token {position}")]
pub struct ParseError {
    /// Description of what would have been accepted.
    pub expected: String,
    /// The offending token's value, its kind for sentinels, or `EOF`.
    pub found: String,
    /// Index of the offending token in the stream.
    pub position: usize,
}

impl ParseError {
    pub fn new(expected: impl Into<String>, found: &Token, position: usize) -> Self {
        Self {
            expected: expected.into(),
            found: describe(found),
            position,
        }
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::EOF => "EOF".to_string(),
        TokenKind::TEXT => format!("{:?}", token.value),
        kind => format!("{kind:?}"),
    }
}
