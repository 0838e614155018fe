//! BCON lexer.
//!
//! Two passes over the source:
//! 1. [`strip_comments`] blanks `#` line comments and `'…'` block comments,
//!    keeping newlines so positions stay stable.
//! 2. The [`scanner`] tokenizes the cleaned text with ordered longest-match
//!    semantics, failing on the first character no pattern covers.
//!
//! Literal decoding (numbers, dates, file paths, regexes) is left to the
//! parser; tokens only carry their kind and location.

mod comments;
mod lex_error;
pub mod scanner;

use bcon_ir::TokenList;

pub use comments::{normalize_newlines, strip_comments};
pub use lex_error::{LexError, LexErrorKind};

/// Tokenize `source`.
///
/// The returned list owns the comment-stripped text its spans refer to and
/// always ends with an `Eof` token.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let cleaned = strip_comments(source)?;
    let tokens = scanner::Scanner::new(&cleaned).scan()?;
    tracing::debug!(tokens = tokens.len(), "lexed");
    Ok(TokenList::new(cleaned, tokens))
}

#[cfg(test)]
mod tests;
