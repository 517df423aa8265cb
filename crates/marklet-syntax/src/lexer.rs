//! # Lexer - Line-Oriented Tokenizing
//!
//! This module turns source text into the flat token stream the parser
//! consumes. Unlike a context-free lexer, it carries block structure across
//! lines: how many block quotes are open, which lists are open, and the
//! indentation baseline the previous line established.
//!
//! ## Per-Line Steps
//!
//! ```text
//! blank line?  → close every quote and list, emit BLANK_LINE
//! indentation  → count leading spaces, at most baseline + 4
//! dedent       → close lists whose marker column is right of the indentation
//! construct    → code block | list item | block quote | nothing
//! remainder    → one TEXT token per character, then "\n"
//! ```
//!
//! Only block structure is decided here. Inline markup is left as single
//! character `TEXT` tokens for the parser to resolve.
//!
//! ## Balance Guarantee
//!
//! Every `BLOCK_QUOTE`, `LIST` and `LIST_ITEM` is closed before the stream
//! ends: blank lines and end of input flush all open contexts.
//!
//! ```
//! use marklet_syntax::lexer::tokenize;
//! use marklet_syntax::TokenKind;
//!
//! let tokens = tokenize("> quoted");
//! assert_eq!(tokens.first().map(|t| t.kind), Some(TokenKind::BLOCK_QUOTE));
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::END_BLOCK_QUOTE));
//! ```

use crate::token::{ListFrame, Token, TokenKind};

/// Columns of extra indentation that turn a line into a code block.
pub const CODE_INDENT: usize = 4;

/// Most spaces consumed after a list marker.
const MAX_MARKER_GAP: usize = 5;

const LIST_MARKERS: [char; 3] = ['-', '+', '*'];
const QUOTE_MARKER: u8 = b'>';

/// Tokenizer state carried from one line to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexState {
    /// Number of currently open block quotes.
    pub quote_depth: usize,
    /// Open lists, outermost first.
    pub frames: Vec<ListFrame>,
    /// Indentation the next line is measured against.
    pub baseline: usize,
}

impl LexState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize one line, which may or may not end in `\n`.
    pub fn push_line(&mut self, line: &str, out: &mut Vec<Token>) {
        let (content, has_newline) = split_line_ending(line);

        if content.trim().is_empty() {
            self.flush(out);
            out.push(Token::blank_line());
            return;
        }

        let limit = self.baseline + CODE_INDENT;
        let indentation = content
            .bytes()
            .take(limit)
            .take_while(|&b| b == b' ')
            .count();

        self.close_lists_beyond(indentation, out);

        // Code blocks are measured against the baseline before this line moves it.
        if indentation == limit {
            log::trace!("code block line at column {indentation}");
            out.push(code_line(&content[indentation..], has_newline, indentation));
            return;
        }

        let rest = &content[indentation..];
        let remainder = match self.open_construct(indentation, rest, out) {
            Opened::Remainder(remainder) => remainder,
            Opened::CodeBlock(code) => {
                let column = content.len() - code.len();
                out.push(code_line(code, has_newline, column));
                return;
            }
        };

        out.extend(remainder.chars().map(Token::text));
        if has_newline {
            out.push(Token::newline());
        }
    }

    /// Close every open block quote and list and reset the baseline.
    pub fn flush(&mut self, out: &mut Vec<Token>) {
        for _ in 0..self.quote_depth {
            out.push(Token::sentinel(TokenKind::END_BLOCK_QUOTE));
        }
        self.quote_depth = 0;

        while self.frames.pop().is_some() {
            out.push(Token::sentinel(TokenKind::END_LIST_ITEM));
            out.push(Token::sentinel(TokenKind::END_LIST));
        }
        self.baseline = 0;
    }

    /// Close lists whose marker sits right of `indentation`.
    fn close_lists_beyond(&mut self, indentation: usize, out: &mut Vec<Token>) {
        let mut closed = false;
        while let Some(frame) = self.frames.last() {
            if frame.anchor <= indentation {
                break;
            }
            log::trace!("dedent to {indentation} closes list at {}", frame.anchor);
            self.frames.pop();
            out.push(Token::sentinel(TokenKind::END_LIST_ITEM));
            out.push(Token::sentinel(TokenKind::END_LIST));
            closed = true;
        }
        if closed {
            self.baseline = self.frames.last().map_or(0, |frame| frame.indent);
        }
    }

    fn open_construct<'a>(
        &mut self,
        indentation: usize,
        rest: &'a str,
        out: &mut Vec<Token>,
    ) -> Opened<'a> {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(marker), Some(' ')) if LIST_MARKERS.contains(&marker) => {
                self.list_item(indentation, marker, &rest[marker.len_utf8()..], out)
            }
            (Some('>'), _) => Opened::Remainder(self.block_quote(rest, out)),
            _ => Opened::Remainder(rest),
        }
    }

    /// Open a list item; `after_marker` starts with at least one space.
    fn list_item<'a>(
        &mut self,
        indentation: usize,
        marker: char,
        after_marker: &'a str,
        out: &mut Vec<Token>,
    ) -> Opened<'a> {
        let gap = after_marker
            .bytes()
            .take(MAX_MARKER_GAP)
            .take_while(|&b| b == b' ')
            .count();
        let content_indent = (gap - 1) % CODE_INDENT + 1;
        let threshold = indentation + marker.len_utf8() + content_indent;

        match self.frames.last() {
            Some(frame) if indentation < frame.indent => {
                out.push(Token::sentinel(TokenKind::END_LIST_ITEM));
            }
            _ => {
                let frame = ListFrame {
                    anchor: indentation,
                    indent: threshold,
                };
                log::trace!("open list {frame:?}");
                self.frames.push(frame);
                out.push(Token::list(frame));
            }
        }

        let padded = format!("{marker}{}", " ".repeat(content_indent));
        out.push(Token::list_item(padded));
        self.baseline = threshold;

        let remainder = &after_marker[gap..];
        if gap == MAX_MARKER_GAP {
            Opened::CodeBlock(remainder)
        } else {
            Opened::Remainder(remainder)
        }
    }

    /// Adjust the quote depth for a line starting with `>`.
    fn block_quote<'a>(&mut self, rest: &'a str, out: &mut Vec<Token>) -> &'a str {
        let bytes = rest.as_bytes();
        let mut count = 0;
        let mut i = 0;
        let mut leftover = "";

        while bytes.get(i) == Some(&QUOTE_MARKER) {
            count += 1;
            i += 1;
            let start = i;
            if matches!(bytes.get(i), Some(b' ' | b'\t')) {
                i += 1;
            }
            leftover = &rest[start..i];
        }
        let remainder = &rest[i..];

        // Lazy continuation: fewer markers, but the line carries content.
        if count < self.quote_depth && !remainder.trim().is_empty() {
            count = self.quote_depth;
        }

        for _ in count..self.quote_depth {
            out.push(Token::sentinel(TokenKind::END_BLOCK_QUOTE));
        }
        for level in self.quote_depth + 1..=count {
            let value = if level == count { leftover } else { "" };
            out.push(Token::block_quote(value, level));
        }
        self.quote_depth = count;

        remainder
    }
}

/// What a line-opening construct left for the rest of the line.
enum Opened<'a> {
    /// Characters still to be emitted as `TEXT`.
    Remainder(&'a str),
    /// The item's first line is itself an indented code block.
    CodeBlock(&'a str),
}

fn code_line(code: &str, has_newline: bool, indentation: usize) -> Token {
    let mut line = code.to_string();
    if has_newline {
        line.push('\n');
    }
    Token::code_block(line, indentation)
}

/// Split a line into its content and whether it ended in a newline.
fn split_line_ending(line: &str) -> (&str, bool) {
    match line.strip_suffix('\n') {
        Some(content) => (content.strip_suffix('\r').unwrap_or(content), true),
        None => (line, false),
    }
}

/// Tokenize a whole document.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut state = LexState::new();
    let mut tokens = Vec::new();

    for line in input.split_inclusive('\n') {
        state.push_line(line, &mut tokens);
    }
    state.flush(&mut tokens);

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Payload;
    use pretty_assertions::assert_eq;
    use TokenKind::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    /// Structural tokens only, with runs of text collapsed into one entry.
    fn outline(input: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for token in tokenize(input) {
            match token.kind {
                TEXT => match out.last_mut() {
                    Some(last) if last.starts_with('"') => {
                        last.pop();
                        last.push_str(&token.value.replace('\n', "\\n"));
                        last.push('"');
                    }
                    _ => out.push(format!("\"{}\"", token.value.replace('\n', "\\n"))),
                },
                CODE_BLOCK => out.push(format!("CODE({:?})", token.value)),
                kind => out.push(format!("{kind:?}")),
            }
        }
        out
    }

    #[test]
    fn tokenize_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn plain_text_is_one_token_per_char() {
        assert_eq!(
            tokenize("ab\n"),
            vec![Token::text('a'), Token::text('b'), Token::newline()]
        );
    }

    #[test]
    fn missing_final_newline_adds_none() {
        assert_eq!(kinds("ab"), vec![TEXT, TEXT]);
    }

    #[test]
    fn crlf_becomes_newline() {
        assert_eq!(
            tokenize("a\r\n"),
            vec![Token::text('a'), Token::newline()]
        );
    }

    #[test]
    fn blank_line_emits_single_token() {
        assert_eq!(kinds("a\n   \nb"), vec![TEXT, TEXT, BLANK_LINE, TEXT]);
    }

    #[test]
    fn top_level_code_block() {
        assert_eq!(outline("    let x = 1;\n    x\n"), vec![
            "CODE(\"let x = 1;\\n\")",
            "CODE(\"x\\n\")",
        ]);
        let tokens = tokenize("    x");
        assert_eq!(tokens[0].data, Some(Payload::Indentation(4)));
    }

    #[test]
    fn extra_code_indentation_stays_in_line() {
        assert_eq!(outline("      x\n"), vec!["CODE(\"  x\\n\")"]);
    }

    #[test]
    fn single_list_item() {
        assert_eq!(outline("- a\n"), vec![
            "LIST",
            "LIST_ITEM",
            "\"a\\n\"",
            "END_LIST_ITEM",
            "END_LIST",
        ]);
    }

    #[test]
    fn list_item_value_is_padded_marker() {
        let tokens = tokenize("*   a");
        assert_eq!(tokens[1].kind, LIST_ITEM);
        assert_eq!(tokens[1].value, "*   ");
        assert_eq!(
            tokens[0].data,
            Some(Payload::Frame(ListFrame {
                anchor: 0,
                indent: 4
            }))
        );
    }

    #[test]
    fn sibling_items_share_a_list() {
        assert_eq!(outline("- a\n- b\n"), vec![
            "LIST",
            "LIST_ITEM",
            "\"a\\n\"",
            "END_LIST_ITEM",
            "LIST_ITEM",
            "\"b\\n\"",
            "END_LIST_ITEM",
            "END_LIST",
        ]);
    }

    #[test]
    fn indented_item_opens_nested_list() {
        assert_eq!(outline("- a\n  - b\nc\n"), vec![
            "LIST",
            "LIST_ITEM",
            "\"a\\n\"",
            "LIST",
            "LIST_ITEM",
            "\"b\\n\"",
            "END_LIST_ITEM",
            "END_LIST",
            "\"c\\n\"",
            "END_LIST_ITEM",
            "END_LIST",
        ]);
    }

    #[test]
    fn slightly_indented_item_is_a_sibling() {
        // Indentation 1 is left of the item content column (2).
        assert_eq!(
            kinds("- a\n - b"),
            vec![LIST, LIST_ITEM, TEXT, TEXT, END_LIST_ITEM, LIST_ITEM, TEXT, END_LIST_ITEM, END_LIST]
        );
    }

    #[test]
    fn marker_without_space_is_text() {
        assert_eq!(outline("-a\n*b*\n"), vec!["\"-a\\n*b*\\n\""]);
    }

    #[test]
    fn five_spaces_after_marker_start_code() {
        assert_eq!(outline("-     code\n"), vec![
            "LIST",
            "LIST_ITEM",
            "CODE(\"code\\n\")",
            "END_LIST_ITEM",
            "END_LIST",
        ]);
        let tokens = tokenize("-     code");
        assert_eq!(tokens[1].value, "- ");
        assert_eq!(tokens[2].data, Some(Payload::Indentation(6)));
    }

    #[test]
    fn code_block_inside_list_item() {
        assert_eq!(outline("- a\n      code\n"), vec![
            "LIST",
            "LIST_ITEM",
            "\"a\\n\"",
            "CODE(\"code\\n\")",
            "END_LIST_ITEM",
            "END_LIST",
        ]);
    }

    #[test]
    fn block_quote_strips_marker_and_space() {
        assert_eq!(outline("> a\n> b\n"), vec![
            "BLOCK_QUOTE",
            "\"a\\nb\\n\"",
            "END_BLOCK_QUOTE",
        ]);
        let tokens = tokenize("> a");
        assert_eq!(tokens[0].value, " ");
        assert_eq!(tokens[0].data, Some(Payload::Depth(1)));
    }

    #[test]
    fn nested_quote_levels_open_outermost_first() {
        let tokens = tokenize(">> a");
        assert_eq!(tokens[0].data, Some(Payload::Depth(1)));
        assert_eq!(tokens[0].value, "");
        assert_eq!(tokens[1].data, Some(Payload::Depth(2)));
        assert_eq!(tokens[1].value, " ");
        assert_eq!(
            kinds(">> a"),
            vec![BLOCK_QUOTE, BLOCK_QUOTE, TEXT, END_BLOCK_QUOTE, END_BLOCK_QUOTE]
        );
    }

    #[test]
    fn lazy_continuation_keeps_depth() {
        assert_eq!(outline("> > a\n> b\n"), vec![
            "BLOCK_QUOTE",
            "BLOCK_QUOTE",
            "\"a\\nb\\n\"",
            "END_BLOCK_QUOTE",
            "END_BLOCK_QUOTE",
        ]);
    }

    #[test]
    fn bare_markers_close_inner_quote() {
        assert_eq!(outline(">> a\n>\nb\n"), vec![
            "BLOCK_QUOTE",
            "BLOCK_QUOTE",
            "\"a\\n\"",
            "END_BLOCK_QUOTE",
            "\"\\nb\\n\"",
            "END_BLOCK_QUOTE",
        ]);
    }

    #[test]
    fn blank_line_closes_everything() {
        assert_eq!(outline("> a\n\n> b\n"), vec![
            "BLOCK_QUOTE",
            "\"a\\n\"",
            "END_BLOCK_QUOTE",
            "BLANK_LINE",
            "BLOCK_QUOTE",
            "\"b\\n\"",
            "END_BLOCK_QUOTE",
        ]);
    }

    #[test]
    fn state_after_list_line() {
        let mut state = LexState::new();
        let mut out = Vec::new();
        state.push_line("- item\n", &mut out);
        assert_eq!(state.baseline, 2);
        assert_eq!(state.frames, vec![ListFrame { anchor: 0, indent: 2 }]);

        state.push_line("\n", &mut out);
        assert_eq!(state, LexState::new());
    }

    #[test]
    fn dedent_restores_outer_baseline() {
        let mut state = LexState::new();
        let mut out = Vec::new();
        state.push_line("- a\n", &mut out);
        state.push_line("  - b\n", &mut out);
        assert_eq!(state.baseline, 4);

        state.push_line("c\n", &mut out);
        assert!(state.frames.is_empty());
        assert_eq!(state.baseline, 0);
    }

    #[test]
    fn quote_depth_tracked_across_lines() {
        let mut state = LexState::new();
        let mut out = Vec::new();
        state.push_line(">>> deep\n", &mut out);
        assert_eq!(state.quote_depth, 3);
        state.push_line(">\n", &mut out);
        assert_eq!(state.quote_depth, 1);
    }

    #[test]
    fn inline_markup_is_not_interpreted() {
        assert_eq!(outline("a **b** -- c\n"), vec!["\"a **b** -- c\\n\""]);
    }
}
