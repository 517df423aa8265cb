//! Block-level grammar rules.

use crate::parser::cursor::{MAX_NESTING, Matcher, TokenCursor};
use crate::parser::error::ParseError;
use crate::token::TokenKind;
use crate::tree::Node;

use super::inline::{self, Context};

const HASH: Matcher<'static> = Matcher::Exact("#");
const PIPE: Matcher<'static> = Matcher::Exact("|");
const DASH: Matcher<'static> = Matcher::Exact("-");
const NEWLINE: Matcher<'static> = Matcher::Exact("\n");

/// Skip blank lines and bare newlines between blocks.
pub fn skip_separators(p: &mut TokenCursor<'_>) {
    while p.at(Matcher::Kind(TokenKind::BLANK_LINE)) || p.at(NEWLINE) {
        p.next();
    }
}

/// Parse a block element.
pub fn block(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    skip_separators(p);

    let token = p.peek();
    match token.kind {
        TokenKind::TEXT if token.is_text("#") => header(p),
        TokenKind::TEXT if token.is_text("|") => table(p),
        TokenKind::BLOCK_QUOTE => nested(p, block_quote),
        TokenKind::CODE_BLOCK => Ok(code_block(p)),
        TokenKind::LIST => nested(p, list),
        _ => paragraph(p),
    }
}

/// Run a container rule one nesting level down. Past [`MAX_NESTING`] the
/// container fails and the document loop recovers from it.
fn nested(
    p: &mut TokenCursor<'_>,
    rule: fn(&mut TokenCursor<'_>) -> Result<Node, ParseError>,
) -> Result<Node, ParseError> {
    if !p.enter() {
        return Err(p.unexpected(format!("at most {MAX_NESTING} nested blocks")));
    }
    let node = rule(p);
    p.leave();
    node
}

/// Consume the newline ending a line. Sentinels and end of input end it too.
fn end_line(p: &mut TokenCursor<'_>) -> Result<(), ParseError> {
    if p.peek().kind.is_sentinel() {
        return Ok(());
    }
    p.expect_or_eof(NEWLINE)
}

/// Parse blocks until the `closer` sentinel, then consume it.
fn blocks_until(p: &mut TokenCursor<'_>, closer: TokenKind) -> Result<Vec<Node>, ParseError> {
    let mut children = Vec::new();
    loop {
        skip_separators(p);
        if p.at(Matcher::Kind(closer)) {
            break;
        }
        children.push(block(p)?);
    }
    p.expect(Matcher::Kind(closer))?;
    Ok(children)
}

/// `#` run, whitespace, inline content, optional newline.
fn header(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    let level = p.expect_all(HASH).len();
    p.expect_all(Matcher::Whitespace);

    let children = inline::inline_until_end(p, Context::Block);
    end_line(p)?;

    Ok(Node::Header { level, children })
}

/// Header row, separator row, then body rows while lines start with `|`.
fn table(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    let header = row(p)?;
    separator_row(p)?;

    let mut rows = Vec::new();
    while p.at(PIPE) {
        rows.push(row(p)?);
    }

    Ok(Node::Table { header, rows })
}

/// `| cell | cell |`; every cell must be closed by a `|`.
fn row(p: &mut TokenCursor<'_>) -> Result<Vec<Node>, ParseError> {
    p.expect(PIPE)?;

    let mut cells = Vec::new();
    loop {
        p.expect_all(Matcher::Whitespace);
        if inline::at_end(p, Context::Block) {
            break;
        }
        cells.push(inline::cell(p));
        p.expect(PIPE)?;
    }
    end_line(p)?;

    Ok(cells)
}

/// `| --- | - |`; only the shape is checked, not the column count.
fn separator_row(p: &mut TokenCursor<'_>) -> Result<(), ParseError> {
    p.expect(PIPE)?;

    let mut columns = 0;
    loop {
        p.expect_all(Matcher::Whitespace);
        if columns > 0 && inline::at_end(p, Context::Block) {
            break;
        }
        p.expect(DASH)?;
        p.expect_all(DASH);
        p.expect_all(Matcher::Whitespace);
        p.expect(PIPE)?;
        columns += 1;
    }

    end_line(p)
}

/// Blocks between a quote's sentinels. A quote may hold no blocks at all: a
/// bare `>` line is an empty quote rather than a quote around an empty
/// paragraph, because an empty paragraph is a parse error.
fn block_quote(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    p.expect(Matcher::Kind(TokenKind::BLOCK_QUOTE))?;
    let children = blocks_until(p, TokenKind::END_BLOCK_QUOTE)?;
    Ok(Node::BlockQuote { children })
}

/// Consecutive code lines form one block.
fn code_block(p: &mut TokenCursor<'_>) -> Node {
    let text = p.expect_all(Matcher::Kind(TokenKind::CODE_BLOCK));
    Node::CodeBlock { text }
}

fn list(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    p.expect(Matcher::Kind(TokenKind::LIST))?;

    let mut children = Vec::new();
    loop {
        children.push(list_item(p)?);
        skip_separators(p);
        if p.at(Matcher::Kind(TokenKind::END_LIST)) {
            break;
        }
    }
    p.expect(Matcher::Kind(TokenKind::END_LIST))?;

    Ok(Node::List { children })
}

fn list_item(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    p.expect(Matcher::Kind(TokenKind::LIST_ITEM))?;
    let children = blocks_until(p, TokenKind::END_LIST_ITEM)?;
    Ok(Node::ListItem { children })
}

/// Inline content of one line. Landing on a sentinel or end of input is an error.
fn paragraph(p: &mut TokenCursor<'_>) -> Result<Node, ParseError> {
    if inline::at_end(p, Context::Block) {
        return Err(p.unexpected("inline content"));
    }
    let children = inline::inline_until_end(p, Context::Block);
    Ok(Node::Paragraph { children })
}
