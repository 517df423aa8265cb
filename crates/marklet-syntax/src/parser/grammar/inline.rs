//! Inline grammar: plain text runs and delimiter-matched styles.
//!
//! Nothing here can fail. An opener without a matching close degrades to a
//! [`Node::Line`] holding the opener as literal text followed by whatever was
//! scanned, so inline markup never aborts the enclosing block. Openers met
//! while [`MAX_NESTING`] spans are already open stay literal text.

use crate::parser::cursor::{MAX_NESTING, Matcher, TokenCursor};
use crate::token::TokenKind;
use crate::tree::{Node, Style};

/// Characters that may open a style span.
const STYLE_CHARS: [char; 7] = ['*', '_', '~', '^', '`', '+', '-'];

/// Characters that end a plain text run.
const TEXT_STOPS: [char; 9] = ['*', '_', '~', '^', '`', '+', '-', '|', '\n'];

/// Where inline content is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Header or paragraph: runs to the end of the line.
    Block,
    /// Table cell: also ends at `|`.
    Cell,
}

/// True when no more inline content follows in this context.
pub fn at_end(p: &TokenCursor<'_>, cx: Context) -> bool {
    let token = p.peek();
    token.kind != TokenKind::TEXT
        || token.is_newline()
        || (cx == Context::Cell && token.is_text("|"))
}

/// Inline nodes up to the end of the line (or cell).
pub fn inline_until_end(p: &mut TokenCursor<'_>, cx: Context) -> Vec<Node> {
    let mut children = Vec::new();
    while !at_end(p, cx) {
        children.push(inline(p, cx));
    }
    children
}

/// A table cell, with trailing whitespace trimmed.
pub fn cell(p: &mut TokenCursor<'_>) -> Node {
    let mut children = inline_until_end(p, Context::Cell);

    let emptied = match children.last_mut() {
        Some(Node::Text { text }) => {
            let len = text.trim_end().len();
            text.truncate(len);
            text.is_empty()
        }
        _ => false,
    };
    if emptied {
        children.pop();
    }

    Node::Line { children }
}

/// One inline node. Always consumes at least one token.
fn inline(p: &mut TokenCursor<'_>, cx: Context) -> Node {
    if p.at(Matcher::OneOf(&STYLE_CHARS)) {
        style(p, cx)
    } else {
        plain_text(p)
    }
}

/// The current token plus every following token that cannot start markup.
fn plain_text(p: &mut TokenCursor<'_>) -> Node {
    let mut text = p.next().value.clone();
    text.push_str(&p.expect_all(Matcher::NoneOf(&TEXT_STOPS)));
    Node::Text { text }
}

fn style(p: &mut TokenCursor<'_>, cx: Context) -> Node {
    let mut opener = p.next().value.clone();

    // Two-character markers win over one-character ones.
    let follower = p.peek();
    if follower.kind == TokenKind::TEXT {
        let pair = format!("{opener}{}", follower.value);
        if Style::from_marker(&pair).is_some() {
            p.next();
            opener = pair;
        }
    }

    let Some(style) = Style::from_marker(&opener) else {
        return Node::Text { text: opener };
    };
    if !p.enter() {
        log::trace!("{MAX_NESTING} spans open, keeping {opener:?} as text");
        return Node::Text { text: opener };
    }

    let node = span(p, cx, style, opener);
    p.leave();
    node
}

/// Scan for the close of `opener` after it has been consumed.
fn span(p: &mut TokenCursor<'_>, cx: Context, style: Style, opener: String) -> Node {
    let mut chars = opener.chars();
    let (first, second) = (chars.next(), chars.next());
    let mut children = Vec::new();

    while !at_end(p, cx) {
        let token = p.peek();
        if token.char() != first {
            children.push(inline(p, cx));
            continue;
        }

        p.next();
        match second {
            None => return Node::Style { style, children },
            Some(c) if p.peek().char() == Some(c) => {
                p.next();
                return Node::Style { style, children };
            }
            Some(_) => children.push(Node::text(token.value.clone())),
        }
    }

    log::trace!("unclosed {opener:?} at token {}, keeping it as text", p.position());
    children.insert(0, Node::Text { text: opener });
    Node::Line { children }
}
