//! Module-level statement loop.

use bcon_ir::ast::Module;
use bcon_ir::TokenKind;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse statements up to and including the single `export`.
    ///
    /// Loose expressions are parsed and discarded. Nothing may follow the
    /// export statement, and a module without one is rejected.
    pub(crate) fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut imports = Vec::new();
        let mut uses = Vec::new();
        let mut classes = Vec::new();

        loop {
            match self.cursor.current_kind() {
                TokenKind::Import => imports.push(self.parse_import()?),
                TokenKind::Use => uses.push(self.parse_use()?),
                TokenKind::Class => classes.push(self.parse_class()?),
                TokenKind::Export => {
                    let body = self.in_error_context(ErrorContext::Export, |p| {
                        p.cursor.advance();
                        let body = p.parse_expr()?;
                        p.expect(TokenKind::Semicolon)?;
                        Ok(body)
                    })?;
                    if !self.cursor.is_at_end() {
                        return Err(ParseError::at(
                            ParseErrorKind::TrailingInput {
                                found: self.cursor.describe_current(),
                            },
                            self.cursor.current(),
                        ));
                    }
                    return Ok(Module {
                        imports,
                        uses,
                        classes,
                        body,
                    });
                }
                TokenKind::Eof => {
                    return Err(ParseError::at(
                        ParseErrorKind::MissingExport,
                        self.cursor.current(),
                    ));
                }
                kind if starts_value(kind) => {
                    self.parse_expr()?;
                    self.expect(TokenKind::Semicolon)?;
                }
                _ => {
                    return Err(ParseError::at(
                        ParseErrorKind::InvalidStatement {
                            found: self.cursor.describe_current(),
                        },
                        self.cursor.current(),
                    ));
                }
            }
        }
    }
}

/// Whether `kind` can begin a value expression.
pub(crate) fn starts_value(kind: TokenKind) -> bool {
    kind.is_literal() || matches!(kind, TokenKind::LBracket | TokenKind::Path | TokenKind::Ident)
}
