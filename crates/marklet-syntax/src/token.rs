//! Token kinds and the token type produced by the tokenizer.
//!
//! The tokenizer emits one `TEXT` token per character of literal content and
//! a handful of structural sentinels that bound block quotes and lists. The
//! parser never has to infer nesting: every opening sentinel is matched by a
//! closing one later in the stream.

use serde::Serialize;

/// All token kinds of the marklet token stream.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    /// One character of literal content (including `\n`)
    TEXT,
    /// Opens one block-quote level
    BLOCK_QUOTE,
    /// Closes one block-quote level
    END_BLOCK_QUOTE,
    /// Opens a list
    LIST,
    /// Closes a list
    END_LIST,
    /// Opens a list item; the value is the marker padded to the content indent
    LIST_ITEM,
    /// Closes a list item
    END_LIST_ITEM,
    /// A full line of indented code, newline included
    CODE_BLOCK,
    /// An empty or whitespace-only line
    BLANK_LINE,
    /// End of stream marker, never produced by the tokenizer
    EOF,
}

impl TokenKind {
    /// Returns true for the structural open/close kinds.
    pub fn is_sentinel(self) -> bool {
        matches!(
            self,
            Self::BLOCK_QUOTE
                | Self::END_BLOCK_QUOTE
                | Self::LIST
                | Self::END_LIST
                | Self::LIST_ITEM
                | Self::END_LIST_ITEM
        )
    }

    /// Returns true for the kinds that close a context.
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            Self::END_BLOCK_QUOTE | Self::END_LIST | Self::END_LIST_ITEM
        )
    }
}

/// An open list: where its marker starts and where item content starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListFrame {
    /// Column of the list marker.
    pub anchor: usize,
    /// Column at which the item's own content begins.
    pub indent: usize,
}

/// Structural payload attached to some tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Indentation column of a `CODE_BLOCK` line.
    Indentation(usize),
    /// The frame pushed by a `LIST` token.
    Frame(ListFrame),
    /// The level opened by a `BLOCK_QUOTE` token (1 = outermost).
    Depth(usize),
}

/// A token with its kind, literal value and optional payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

/// The value returned by a cursor that has run past the last token.
pub static EOF_TOKEN: Token = Token {
    kind: TokenKind::EOF,
    value: String::new(),
    data: None,
};

impl Token {
    pub fn text(c: char) -> Self {
        Self {
            kind: TokenKind::TEXT,
            value: c.to_string(),
            data: None,
        }
    }

    pub fn newline() -> Self {
        Self::text('\n')
    }

    /// A sentinel without literal value or payload.
    pub fn sentinel(kind: TokenKind) -> Self {
        Self {
            kind,
            value: String::new(),
            data: None,
        }
    }

    pub fn blank_line() -> Self {
        Self::sentinel(TokenKind::BLANK_LINE)
    }

    pub fn block_quote(leftover: &str, depth: usize) -> Self {
        Self {
            kind: TokenKind::BLOCK_QUOTE,
            value: leftover.to_string(),
            data: Some(Payload::Depth(depth)),
        }
    }

    pub fn list(frame: ListFrame) -> Self {
        Self {
            kind: TokenKind::LIST,
            value: String::new(),
            data: Some(Payload::Frame(frame)),
        }
    }

    pub fn list_item(marker: String) -> Self {
        Self {
            kind: TokenKind::LIST_ITEM,
            value: marker,
            data: None,
        }
    }

    pub fn code_block(line: String, indentation: usize) -> Self {
        Self {
            kind: TokenKind::CODE_BLOCK,
            value: line,
            data: Some(Payload::Indentation(indentation)),
        }
    }

    /// A `TEXT` token holding exactly `value`.
    pub fn is_text(&self, value: &str) -> bool {
        self.kind == TokenKind::TEXT && self.value == value
    }

    pub fn is_newline(&self) -> bool {
        self.is_text("\n")
    }

    /// The single character of a `TEXT` token.
    pub fn char(&self) -> Option<char> {
        if self.kind != TokenKind::TEXT {
            return None;
        }
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}
