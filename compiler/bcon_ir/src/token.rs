//! Token model produced by the lexer and consumed by the parser.

use std::fmt;
use std::ops::Index;

use crate::Span;

/// Token kinds.
///
/// Literal kinds carry no payload: literal decoding happens in the parser,
/// which slices the token text out of the owning [`TokenList`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    String,
    Number,
    BigInt,
    Boolean,
    Null,
    Undefined,
    Date,
    File,
    RegExp,

    // Keywords
    Import,
    Use,
    Export,
    From,
    As,
    Skip,
    Class,
    Extends,
    Includes,

    // Markers
    /// `=>`
    Arrow,
    /// `...`
    Spread,
    /// `@name`
    AssocKey,
    /// `@*`
    NumericKey,

    // Names
    /// Dotted reference such as `Main.server.port` or `items.0`.
    Path,
    Ident,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Question,
    Equals,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in "expected X" diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::BigInt => "bigint",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "Null",
            TokenKind::Undefined => "Undefined",
            TokenKind::Date => "date literal",
            TokenKind::File => "file literal",
            TokenKind::RegExp => "regular expression",
            TokenKind::Import => "import",
            TokenKind::Use => "use",
            TokenKind::Export => "export",
            TokenKind::From => "from",
            TokenKind::As => "as",
            TokenKind::Skip => "skip",
            TokenKind::Class => "class",
            TokenKind::Extends => "extends",
            TokenKind::Includes => "includes",
            TokenKind::Arrow => "=>",
            TokenKind::Spread => "...",
            TokenKind::AssocKey => "@key",
            TokenKind::NumericKey => "@*",
            TokenKind::Path => "path",
            TokenKind::Ident => "identifier",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Equals => "=",
            TokenKind::Eof => "end of input",
        }
    }

    /// Whether this kind starts a literal value.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::BigInt
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::Undefined
                | TokenKind::Date
                | TokenKind::File
                | TokenKind::RegExp
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its location.
///
/// `line` and `column` are 1-based; columns count characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind,
            span,
            line,
            column,
        }
    }
}

/// Lexer output: the cleaned source text plus the tokens that cover it.
///
/// Invariant: the last token is always [`TokenKind::Eof`].
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    source: String,
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new(source: String, tokens: Vec<Token>) -> Self {
        TokenList { source, tokens }
    }

    /// The comment-stripped text that token spans refer to.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text of `token`.
    pub fn text(&self, token: &Token) -> &str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kinds in order, convenient for assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
