//! Class declarations.

use bcon_ir::ast::{ClassDecl, ClassField, Param};
use bcon_ir::{TokenKind, TypeExpr};

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `class Name (params)? (extends Base)? (includes M1 M2 …)? [ fields ];`
    pub(crate) fn parse_class(&mut self) -> Result<ClassDecl, ParseError> {
        self.in_error_context(ErrorContext::ClassDecl, Self::parse_class_inner)
    }

    fn parse_class_inner(&mut self) -> Result<ClassDecl, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::Class)?;
        let name = self.cursor.expect_ident("a class name")?.to_owned();

        let parameters = if self.check(TokenKind::LParen) {
            self.in_error_context(ErrorContext::ClassParams, Self::parse_params)?
        } else {
            Vec::new()
        };

        let base = if self.eat(TokenKind::Extends) {
            Some(self.cursor.expect_ident("a base class name")?.to_owned())
        } else {
            None
        };

        let mut mixins = Vec::new();
        if self.eat(TokenKind::Includes) {
            mixins.push(self.cursor.expect_ident("a mixin class name")?.to_owned());
            while self.check(TokenKind::Ident) {
                mixins.push(self.cursor.expect_ident("a mixin class name")?.to_owned());
            }
        }

        self.expect(TokenKind::LBracket)?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBracket) {
            let field = self.in_error_context(ErrorContext::ClassField, |p| p.parse_field(false))?;
            fields.push(field);
        }
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Semicolon)?;

        tracing::trace!(class = %name, fields = fields.len(), "parsed class");
        Ok(ClassDecl {
            name,
            parameters,
            base,
            mixins,
            fields,
            span: start.merge(self.previous_span()),
        })
    }

    /// `( a, b, ...rest )`. Only the last parameter may be spread.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params: Vec<Param> = Vec::new();

        while !self.check(TokenKind::RParen) {
            let token = self.cursor.current();
            if let Some(prev) = params.last().filter(|p| p.spread) {
                return Err(ParseError::at(
                    ParseErrorKind::SpreadParameterNotLast {
                        name: prev.name.clone(),
                    },
                    token,
                ));
            }
            let spread = self.eat(TokenKind::Spread);
            let name = self.cursor.expect_ident("a parameter name")?.to_owned();
            params.push(Param { name, spread });

            if !self.eat(TokenKind::Comma) && !self.check(TokenKind::RParen) {
                return Err(self.cursor.unexpected("\",\" or \")\" in the parameter list"));
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// `@name ?? (: Type)? (=> default)? ;`
    ///
    /// A missing annotation means `Any`. Inline object types also accept
    /// `=` before the default, which `allow_equals` enables.
    pub(crate) fn parse_field(&mut self, allow_equals: bool) -> Result<ClassField, ParseError> {
        let start = self.current_span();
        let name = self.expect_key()?;
        let optional = self.eat(TokenKind::Question);
        let ty = if self.eat(TokenKind::Colon) {
            self.parse_type()?
        } else {
            TypeExpr::any()
        };
        let has_default =
            self.eat(TokenKind::Arrow) || (allow_equals && self.eat(TokenKind::Equals));
        let default = if has_default {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(ClassField {
            name,
            ty,
            optional,
            default,
            span: start.merge(self.previous_span()),
        })
    }

    /// `@name`, returned without the `@`.
    fn expect_key(&mut self) -> Result<String, ParseError> {
        if !self.check(TokenKind::AssocKey) {
            return Err(self.cursor.unexpected("\"@name\""));
        }
        let token = self.cursor.advance();
        let text = self.cursor.text(token);
        Ok(text.strip_prefix('@').unwrap_or(text).to_owned())
    }
}
