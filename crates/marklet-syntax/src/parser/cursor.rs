use std::fmt;

use crate::token::{EOF_TOKEN, Token, TokenKind};

use super::error::ParseError;

/// What a token must look like to be consumed by [`TokenCursor::expect`].
///
/// Value matchers only accept `TEXT` tokens; sentinels are matched by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher<'m> {
    /// A `TEXT` token with exactly this value.
    Exact(&'m str),
    /// A `TEXT` token whose character is in the set.
    OneOf(&'m [char]),
    /// A `TEXT` token whose character is not in the set.
    NoneOf(&'m [char]),
    /// A `TEXT` token holding a space or tab.
    Whitespace,
    /// Any token of this kind.
    Kind(TokenKind),
}

impl Matcher<'_> {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Matcher::Kind(kind) => token.kind == *kind,
            Matcher::Exact(value) => token.is_text(value),
            Matcher::OneOf(set) => token.char().is_some_and(|c| set.contains(&c)),
            Matcher::NoneOf(set) => token.char().is_some_and(|c| !set.contains(&c)),
            Matcher::Whitespace => matches!(token.char(), Some(' ' | '\t')),
        }
    }
}

impl fmt::Display for Matcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Exact(value) => write!(f, "`{}`", value.escape_debug()),
            Matcher::OneOf(set) => {
                let chars: String = set.iter().collect();
                write!(f, "one of `{chars}`")
            }
            Matcher::NoneOf(set) => {
                let chars: String = set.iter().collect();
                write!(f, "none of `{}`", chars.escape_debug())
            }
            Matcher::Whitespace => f.write_str("whitespace"),
            Matcher::Kind(kind) => write!(f, "{kind:?}"),
        }
    }
}

/// How many block containers and style spans may be open at once.
pub const MAX_NESTING: usize = 128;

/// A forward-only reader over a token slice.
///
/// Reading past the end yields [`EOF_TOKEN`] rather than failing, so grammar
/// rules can always look at "the next token". The cursor also counts how
/// deeply the grammar has nested, so recursive rules stay within
/// [`MAX_NESTING`] frames whatever the input.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// The current token without advancing.
    pub fn peek(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&EOF_TOKEN)
    }

    /// Open one nesting level. Returns false, leaving the depth unchanged,
    /// once [`MAX_NESTING`] levels are open.
    pub fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            return false;
        }
        self.depth += 1;
        true
    }

    /// Close the level opened by a successful [`enter`](Self::enter).
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The current token, advancing past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &'t Token {
        let token = self.peek();
        if self.has_next() {
            self.pos += 1;
        }
        token
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Index of the current token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens between `start` and the current position.
    pub fn consumed_since(&self, start: usize) -> &'t [Token] {
        &self.tokens[start.min(self.pos)..self.pos]
    }

    pub fn at(&self, matcher: Matcher<'_>) -> bool {
        matcher.matches(self.peek())
    }

    /// Consume one token, which must satisfy `matcher`.
    pub fn expect(&mut self, matcher: Matcher<'_>) -> Result<&'t Token, ParseError> {
        if self.at(matcher) {
            Ok(self.next())
        } else {
            Err(self.unexpected(matcher))
        }
    }

    /// Consume tokens while they satisfy `matcher`, returning their values.
    pub fn expect_all(&mut self, matcher: Matcher<'_>) -> String {
        let mut out = String::new();
        while self.at(matcher) {
            out.push_str(&self.next().value);
        }
        out
    }

    /// Like [`expect`](Self::expect), but accepts an exhausted stream.
    pub fn expect_or_eof(&mut self, matcher: Matcher<'_>) -> Result<(), ParseError> {
        if self.has_next() {
            self.expect(matcher)?;
        }
        Ok(())
    }

    /// An error describing the current token as not being `expected`.
    pub fn unexpected(&self, expected: impl fmt::Display) -> ParseError {
        ParseError::new(expected.to_string(), self.peek(), self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn peek_does_not_advance() {
        let tokens = tokenize("ab");
        let cur = TokenCursor::new(&tokens);
        assert_eq!(cur.peek().value, "a");
        assert_eq!(cur.peek().value, "a");
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn next_past_end_returns_eof() {
        let tokens = tokenize("a");
        let mut cur = TokenCursor::new(&tokens);
        assert_eq!(cur.next().value, "a");
        assert!(!cur.has_next());
        assert_eq!(cur.next().kind, TokenKind::EOF);
        assert_eq!(cur.next().kind, TokenKind::EOF);
        assert_eq!(cur.position(), 1);
    }

    #[test]
    fn empty_stream() {
        let mut cur = TokenCursor::new(&[]);
        assert!(!cur.has_next());
        assert_eq!(cur.peek().kind, TokenKind::EOF);
        assert_eq!(cur.next().kind, TokenKind::EOF);
    }

    #[test]
    fn expect_exact_value() {
        let tokens = tokenize("|x");
        let mut cur = TokenCursor::new(&tokens);
        assert_eq!(cur.expect(Matcher::Exact("|")).map(|t| t.value.as_str()), Ok("|"));

        let err = cur.expect(Matcher::Exact("|")).unwrap_err();
        assert_eq!(err.expected, "`|`");
        assert_eq!(err.found, "\"x\"");
        assert_eq!(err.position, 1);
    }

    #[test]
    fn expect_reports_eof() {
        let tokens = tokenize("#");
        let mut cur = TokenCursor::new(&tokens);
        cur.next();
        let err = cur.expect(Matcher::Exact("\n")).unwrap_err();
        assert_eq!(err.found, "EOF");
        assert_eq!(err.to_string(), "expected `\\n`, found EOF at token 1");
    }

    #[test]
    fn expect_all_concatenates() {
        let tokens = tokenize("### title");
        let mut cur = TokenCursor::new(&tokens);
        assert_eq!(cur.expect_all(Matcher::Exact("#")), "###");
        assert_eq!(cur.expect_all(Matcher::Exact("#")), "");
        assert_eq!(cur.expect_all(Matcher::Whitespace), " ");
        assert_eq!(cur.peek().value, "t");
    }

    #[test]
    fn expect_all_with_char_class() {
        let tokens = tokenize("-+-x");
        let mut cur = TokenCursor::new(&tokens);
        assert_eq!(cur.expect_all(Matcher::OneOf(&['-', '+'])), "-+-");
    }

    #[test]
    fn none_of_stops_at_listed_char_and_sentinels() {
        let tokens = tokenize("ab*c");
        let mut cur = TokenCursor::new(&tokens);
        assert_eq!(cur.expect_all(Matcher::NoneOf(&['*'])), "ab");
        assert!(!Matcher::NoneOf(&['*']).matches(&EOF_TOKEN));
    }

    #[test]
    fn expect_or_eof_tolerates_end() {
        let tokens = tokenize("a");
        let mut cur = TokenCursor::new(&tokens);
        cur.next();
        assert_eq!(cur.expect_or_eof(Matcher::Exact("\n")), Ok(()));
    }

    #[test]
    fn expect_or_eof_still_checks_present_token() {
        let tokens = tokenize("ab");
        let mut cur = TokenCursor::new(&tokens);
        cur.next();
        assert!(cur.expect_or_eof(Matcher::Exact("\n")).is_err());
    }

    #[test]
    fn value_matchers_ignore_sentinels() {
        let tokens = tokenize("> |");
        let cur = TokenCursor::new(&tokens);
        // The BLOCK_QUOTE sentinel carries " " as its value.
        assert!(!cur.at(Matcher::Whitespace));
        assert!(cur.at(Matcher::Kind(TokenKind::BLOCK_QUOTE)));
    }

    #[test]
    fn consumed_since_start() {
        let tokens = tokenize("abc");
        let mut cur = TokenCursor::new(&tokens);
        cur.next();
        cur.next();
        let values: Vec<_> = cur.consumed_since(0).iter().map(|t| &t.value).collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn nesting_stops_at_the_limit() {
        let mut cur = TokenCursor::new(&[]);
        for _ in 0..MAX_NESTING {
            assert!(cur.enter());
        }
        assert!(!cur.enter());
        assert_eq!(cur.depth(), MAX_NESTING);

        cur.leave();
        assert!(cur.enter());
    }

    #[test]
    fn leave_at_top_level_is_harmless() {
        let mut cur = TokenCursor::new(&[]);
        cur.leave();
        assert_eq!(cur.depth(), 0);
    }
}
