//! Lexer errors.
//!
//! Every lexical failure is fatal and carries the position of the first
//! character that could not be tokenized.

use bcon_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic};
use bcon_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// No token pattern covers this character.
    #[error("unexpected character \"{ch}\"")]
    UnexpectedCharacter { ch: char },
    /// A `"` that never closes.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A `'` block comment that runs to the end of input.
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
}

impl LexError {
    #[cold]
    pub fn unexpected_character(ch: char, span: Span, line: u32, column: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedCharacter { ch },
            span,
            line,
            column,
        }
    }

    #[cold]
    pub fn unterminated_string(span: Span, line: u32, column: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            span,
            line,
            column,
        }
    }

    #[cold]
    pub fn unterminated_block_comment(span: Span, line: u32, column: u32) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedBlockComment,
            span,
            line,
            column,
        }
    }
}

impl IntoDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(ErrorCode::E0001)
            .with_message(self.kind.to_string())
            .at(self.line, self.column);
        match self.kind {
            LexErrorKind::UnterminatedString => diag.with_note("add a closing `\"`"),
            LexErrorKind::UnterminatedBlockComment => {
                diag.with_note("block comments open and close with `'`")
            }
            LexErrorKind::UnexpectedCharacter { .. } => diag,
        }
    }
}

#[cfg(test)]
mod tests;
