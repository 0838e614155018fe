//! Type annotations.

use bcon_ir::{TokenKind, TypeExpr};
use bcon_stack::ensure_sufficient_stack;

use super::literal::string_body;
use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Parse a type.
    ///
    /// - `Name`: primitive or class
    /// - `"value"`: exact string
    /// - `[ @key: Type; … ]`: inline record shape
    /// - `[]` or `[Type]`: homogeneous sequence
    /// - `[Type; Type; …]`: tuple, marked by any `;`
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.in_error_context(ErrorContext::TypeAnnotation, |p| {
            ensure_sufficient_stack(|| p.parse_type_inner())
        })
    }

    fn parse_type_inner(&mut self) -> Result<TypeExpr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident => {
                let name = self.cursor.expect_ident("a type")?;
                Ok(TypeExpr::Reference(name.to_owned()))
            }
            TokenKind::String => {
                let token = self.cursor.advance();
                Ok(TypeExpr::Literal(string_body(self.cursor.text(token)).to_owned()))
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                if self.check(TokenKind::AssocKey) {
                    let mut fields = Vec::new();
                    while !self.check(TokenKind::RBracket) {
                        fields.push(self.parse_field(true)?);
                    }
                    self.expect(TokenKind::RBracket)?;
                    return Ok(TypeExpr::Object(fields));
                }

                let mut elems = Vec::new();
                let mut tuple = false;
                while !self.check(TokenKind::RBracket) {
                    elems.push(self.parse_type()?);
                    if self.eat(TokenKind::Semicolon) {
                        tuple = true;
                    } else if !self.check(TokenKind::RBracket) {
                        return Err(self.cursor.unexpected("\";\" or \"]\" in the type"));
                    }
                }
                self.expect(TokenKind::RBracket)?;

                Ok(if tuple {
                    TypeExpr::Tuple(elems)
                } else {
                    TypeExpr::Array(elems.pop().map(Box::new))
                })
            }
            _ => Err(self.cursor.unexpected("a type")),
        }
    }
}
