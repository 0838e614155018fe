//! Parse error types.
//!
//! Parsing stops at the first error. Every error records the offending
//! token's position and, when known, what was being parsed.

mod context;

use std::path::PathBuf;

use bcon_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic};
use bcon_ir::{Span, Token};

pub use context::ErrorContext;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub context: Option<ErrorContext>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("expected import, class, use, export, or a value, found {found}")]
    InvalidStatement { found: String },
    #[error("cannot mix @key and @* entries in one literal")]
    MixedContainerKeys,
    #[error("invalid number literal {text}")]
    InvalidNumber { text: String },
    #[error("invalid bigint literal {text}")]
    InvalidBigInt { text: String },
    #[error("invalid date \"{text}\"")]
    InvalidDate { text: String },
    #[error("invalid regular expression /{pattern}/: {reason}")]
    InvalidRegExp { pattern: String, reason: String },
    #[error("unknown encoding \"{name}\"")]
    UnknownEncoding { name: String },
    #[error("file \"{}\" does not exist", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("\"{}\" is not a file", .path.display())]
    NotAFile { path: PathBuf },
    #[error("spread parameter \"{name}\" must be the last parameter")]
    SpreadParameterNotLast { name: String },
    #[error("cannot use destructuring syntax with \"as\" keyword")]
    DestructuringWithAs,
    #[error("module has no export statement")]
    MissingExport,
    #[error("unexpected {found} after the export statement")]
    TrailingInput { found: String },
}

impl ParseErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedToken { .. } | Self::InvalidStatement { .. } => ErrorCode::E1001,
            Self::UnexpectedEof { .. } => ErrorCode::E1002,
            Self::MixedContainerKeys => ErrorCode::E1003,
            Self::InvalidNumber { .. } | Self::InvalidBigInt { .. } => ErrorCode::E1004,
            Self::InvalidDate { .. } => ErrorCode::E1005,
            Self::InvalidRegExp { .. } => ErrorCode::E1006,
            Self::UnknownEncoding { .. } => ErrorCode::E1007,
            Self::FileNotFound { .. } => ErrorCode::E1008,
            Self::NotAFile { .. } => ErrorCode::E1009,
            Self::SpreadParameterNotLast { .. } => ErrorCode::E1010,
            Self::DestructuringWithAs => ErrorCode::E1011,
            Self::MissingExport => ErrorCode::E1012,
            Self::TrailingInput { .. } => ErrorCode::E1013,
        }
    }
}

impl ParseError {
    /// Error of `kind` reported at `token`.
    #[cold]
    pub fn at(kind: ParseErrorKind, token: &Token) -> Self {
        ParseError {
            kind,
            span: token.span,
            line: token.line,
            column: token.column,
            context: None,
        }
    }

    /// Record what was being parsed, unless an inner context already did.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl IntoDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .at(self.line, self.column);
        match self.context {
            Some(context) => diag.with_note(format!("while parsing {}", context.description())),
            None => diag,
        }
    }
}

#[cfg(test)]
mod tests;
