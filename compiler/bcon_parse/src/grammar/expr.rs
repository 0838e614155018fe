//! Value expressions.

use bcon_ir::ast::{Argument, Container, ContainerKind, Expr, ExprKind, KeyPath, Member};
use bcon_ir::TokenKind;
use bcon_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `primary (? primary)?`
    ///
    /// The conditional takes exactly one primary on each side; it does not
    /// chain.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let left = self.parse_primary()?;
            if !self.eat(TokenKind::Question) {
                return Ok(left);
            }
            let right = self.parse_primary()?;
            let span = left.span.merge(right.span);
            Ok(Expr::new(
                ExprKind::Conditional {
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ))
        })
    }

    /// Container, literal, dotted path, or identifier. An identifier directly
    /// followed by `(` is a constructor call; by `[`, a class instance.
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::LBracket => {
                let container = self.parse_container()?;
                Ok(Expr::new(
                    ExprKind::Container(container),
                    token.span.merge(self.previous_span()),
                ))
            }
            kind if kind.is_literal() => {
                self.cursor.advance();
                let literal = self.decode_literal(token)?;
                Ok(Expr::new(ExprKind::Literal(literal), token.span))
            }
            TokenKind::Path => {
                self.cursor.advance();
                let path: KeyPath = self
                    .cursor
                    .text(token)
                    .split('.')
                    .map(str::to_owned)
                    .collect();
                Ok(Expr::new(ExprKind::Path(path), token.span))
            }
            TokenKind::Ident => {
                self.cursor.advance();
                let name = self.cursor.text(token).to_owned();
                let kind = if self.check(TokenKind::LParen) {
                    let args = self.in_error_context(ErrorContext::Arguments, Self::parse_args)?;
                    ExprKind::ConstructorCall { class: name, args }
                } else if self.check(TokenKind::LBracket) {
                    let body = self.parse_container()?;
                    ExprKind::ClassInstance { class: name, body }
                } else {
                    ExprKind::Ident(name)
                };
                Ok(Expr::new(kind, token.span.merge(self.previous_span())))
            }
            _ => Err(self.cursor.unexpected("a value")),
        }
    }

    /// `( arg, ...spread, … )`, trailing comma allowed.
    fn parse_args(&mut self) -> Result<Vec<Argument>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            let spread = self.eat(TokenKind::Spread);
            let value = self.parse_expr()?;
            args.push(Argument { value, spread });
            if !self.eat(TokenKind::Comma) && !self.check(TokenKind::RParen) {
                return Err(self.cursor.unexpected("\",\" or \")\" in the argument list"));
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// `[ member; … ]`
    ///
    /// The first `@key` or `@*` fixes the kind; a later member of the other
    /// kind is an error. Spreads never fix the kind, so a body of only
    /// spreads stays [`ContainerKind::Unknown`].
    pub(crate) fn parse_container(&mut self) -> Result<Container, ParseError> {
        self.in_error_context(ErrorContext::Container, |p| {
            p.expect(TokenKind::LBracket)?;
            let mut kind = ContainerKind::Unknown;
            let mut members = Vec::new();

            while !p.check(TokenKind::RBracket) {
                let token = p.cursor.current();
                let member = match token.kind {
                    TokenKind::Spread => {
                        p.cursor.advance();
                        Member::Spread {
                            argument: p.parse_expr()?,
                        }
                    }
                    TokenKind::AssocKey | TokenKind::NumericKey => {
                        let member_kind = if token.kind == TokenKind::AssocKey {
                            ContainerKind::Object
                        } else {
                            ContainerKind::Array
                        };
                        if kind == ContainerKind::Unknown {
                            kind = member_kind;
                        } else if kind != member_kind {
                            return Err(ParseError::at(ParseErrorKind::MixedContainerKeys, token));
                        }
                        p.cursor.advance();
                        p.expect(TokenKind::Arrow)?;
                        let value = p.parse_expr()?;
                        match member_kind {
                            ContainerKind::Object => {
                                let text = p.cursor.text(token);
                                Member::Property {
                                    key: text.strip_prefix('@').unwrap_or(text).to_owned(),
                                    value,
                                }
                            }
                            _ => Member::Element { value },
                        }
                    }
                    _ => return Err(p.cursor.unexpected("\"@key\", \"@*\" or \"...\"")),
                };
                p.expect(TokenKind::Semicolon)?;
                members.push(member);
            }
            p.expect(TokenKind::RBracket)?;

            Ok(Container { kind, members })
        })
    }
}
