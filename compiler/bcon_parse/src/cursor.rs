//! Token cursor for navigating the token stream.

use bcon_ir::{Span, Token, TokenKind, TokenList};

use crate::{ParseError, ParseErrorKind};

/// Position in a [`TokenList`].
///
/// Invariant: `pos` is always a valid index. The list ends with `Eof` and
/// [`advance`](Self::advance) never moves past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The current token. A list without tokens reads as a synthetic `Eof`.
    #[inline]
    pub fn current(&self) -> &'a Token {
        static EOF: Token = Token::new(TokenKind::Eof, Span::DUMMY, 1, 1);
        let tokens: &'a TokenList = self.tokens;
        tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// Kind of the token `n` positions ahead; `Eof` past the end.
    #[inline]
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token and return it. Stays put on `Eof`.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has `kind`.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("\"{}\"", kind.display_name())))
        }
    }

    /// Consume an identifier and return its text.
    pub fn expect_ident(&mut self, what: &str) -> Result<&'a str, ParseError> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok(self.text(token))
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Source text of `token`.
    #[inline]
    pub fn text(&self, token: &Token) -> &'a str {
        let tokens: &'a TokenList = self.tokens;
        tokens.text(token)
    }

    /// How the current token is named in "found X" messages.
    pub fn describe_current(&self) -> String {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => "end of input".to_owned(),
            _ => format!("\"{}\"", self.text(token)),
        }
    }

    /// Error for "expected `expected`" at the current token.
    #[cold]
    #[inline(never)]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let kind = if token.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_owned(),
            }
        } else {
            ParseErrorKind::UnexpectedToken {
                expected: expected.to_owned(),
                found: self.describe_current(),
            }
        };
        ParseError::at(kind, token)
    }
}
