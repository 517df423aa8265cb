//! # Grammar Rules
//!
//! Each rule takes a `&mut TokenCursor` and uses its primitives to:
//!
//! 1. Inspect the next token (`p.peek()`, `p.at()`)
//! 2. Consume tokens (`p.next()`, `p.expect()`, `p.expect_all()`)
//! 3. Return the node it built, or a `ParseError` for block rules
//!
//! ## Module Structure
//!
//! - [`block`] - Headers, tables, quotes, code blocks, lists, paragraphs
//! - [`inline`] - Plain text and delimiter-matched styles
//!
//! ## Error Recovery
//!
//! Block rules bail out with `?` as soon as an expectation fails. Only
//! [`document`] handles the error: it resynchronizes on the next newline and
//! keeps going, so one malformed construct costs at most the lines it spans.
//! Closing sentinels of the containers the failure unwound are swallowed
//! into the same error; any the document loop still meets are skipped, as no
//! block can start with one.
//!
//! ## Nesting
//!
//! Block containers and style spans recurse. Both count their depth on the
//! cursor: a container past the limit fails like any other block, and a
//! style opener past it stays literal text.

mod block;
mod inline;

use crate::parser::cursor::{Matcher, TokenCursor};
use crate::parser::error::ParseError;
use crate::token::TokenKind;
use crate::tree::Node;

/// Parse the root document.
pub fn document(p: &mut TokenCursor<'_>) -> Node {
    let mut children = Vec::new();

    loop {
        block::skip_separators(p);
        if p.peek().kind.is_closer() {
            log::debug!("skipping orphan {:?} at token {}", p.peek().kind, p.position());
            p.next();
            continue;
        }
        if !p.has_next() {
            break;
        }

        let start = p.position();
        match block::block(p) {
            Ok(node) => children.push(node),
            Err(err) => children.push(recover(p, start, &err)),
        }
    }

    Node::Document { children }
}

/// Skip through the next newline and wrap everything since `start` as an error.
///
/// A blank line also ends the skipped region, without being consumed. The
/// closers that directly follow belong to containers the failure abandoned,
/// so they are consumed too.
fn recover(p: &mut TokenCursor<'_>, start: usize, err: &ParseError) -> Node {
    while p.has_next() && !p.at(Matcher::Kind(TokenKind::BLANK_LINE)) {
        if p.next().is_newline() {
            break;
        }
    }
    while p.peek().kind.is_closer() {
        p.next();
    }

    let mut text: String = p
        .consumed_since(start)
        .iter()
        .map(|t| t.value.as_str())
        .collect();
    if text.ends_with('\n') {
        text.pop();
    }

    log::debug!("recovered from parse error ({err}), discarding {text:?}");
    Node::Error { text }
}
