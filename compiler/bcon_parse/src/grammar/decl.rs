//! `import` and `use` statements, and their bindings.

use bcon_ir::ast::{Binding, DestructureEntry, FileRef, ImportDecl, KeyPath, UseDecl};
use bcon_ir::TokenKind;
use bcon_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse an import statement.
    ///
    /// Syntax variants:
    /// - `import "file".enc as name;`
    /// - `import "file".enc as [bindings];`
    /// - `import [bindings] from "file".enc;`
    pub(crate) fn parse_import(&mut self) -> Result<ImportDecl, ParseError> {
        self.in_error_context(ErrorContext::Import, |p| {
            let start = p.current_span();
            p.expect(TokenKind::Import)?;

            let (source, binding) = if p.check(TokenKind::LBracket) {
                let binding = p.parse_destructuring()?;
                if !p.eat(TokenKind::From) {
                    return Err(p.cursor.unexpected("\"from\" after the bindings"));
                }
                (p.parse_file_operand("a file literal after \"from\"")?, binding)
            } else {
                let source = p.parse_file_operand("a file literal")?;
                p.expect(TokenKind::As)?;
                (source, p.parse_binding()?)
            };
            p.expect(TokenKind::Semicolon)?;

            Ok(ImportDecl {
                source,
                binding,
                span: start.merge(p.previous_span()),
            })
        })
    }

    fn parse_file_operand(&mut self, expected: &str) -> Result<FileRef, ParseError> {
        if !self.check(TokenKind::File) {
            return Err(self.cursor.unexpected(expected));
        }
        let token = self.cursor.advance();
        self.decode_file(token)
    }

    /// Parse a use statement.
    ///
    /// `use [` opens a destructuring pattern when the next token is an
    /// identifier, `[`, `;` or `skip`; anything else is a value. A bare
    /// identifier, constructor call or class instance is taken without the
    /// `?` operator, everything else as a full expression.
    pub(crate) fn parse_use(&mut self) -> Result<UseDecl, ParseError> {
        self.in_error_context(ErrorContext::Use, |p| {
            let start = p.current_span();
            p.expect(TokenKind::Use)?;

            if p.check(TokenKind::LBracket) && opens_destructuring(p.cursor.peek_kind(1)) {
                let binding = p.parse_destructuring()?;
                match p.cursor.current_kind() {
                    TokenKind::From => {
                        p.cursor.advance();
                    }
                    TokenKind::As => {
                        return Err(ParseError::at(
                            ParseErrorKind::DestructuringWithAs,
                            p.cursor.current(),
                        ));
                    }
                    _ => return Err(p.cursor.unexpected("\"from\" after the bindings")),
                }
                let value = p.parse_expr()?;
                p.expect(TokenKind::Semicolon)?;
                return Ok(UseDecl {
                    value,
                    binding,
                    span: start.merge(p.previous_span()),
                });
            }

            let value = if p.check(TokenKind::Ident) {
                p.parse_primary()?
            } else {
                p.parse_expr()?
            };
            p.expect(TokenKind::As)?;
            let binding = p.parse_binding()?;
            p.expect(TokenKind::Semicolon)?;

            Ok(UseDecl {
                value,
                binding,
                span: start.merge(p.previous_span()),
            })
        })
    }

    /// A name or a destructuring pattern.
    fn parse_binding(&mut self) -> Result<Binding, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident => {
                let name = self.cursor.expect_ident("a binding name")?;
                Ok(Binding::Ident(name.to_owned()))
            }
            TokenKind::LBracket => self.parse_destructuring(),
            _ => Err(self.cursor.unexpected("an identifier or \"[\"")),
        }
    }

    fn parse_destructuring(&mut self) -> Result<Binding, ParseError> {
        self.in_error_context(ErrorContext::Destructuring, |p| {
            let mut entries = Vec::new();
            p.parse_destructure_group(&KeyPath::new(), &mut entries)?;
            Ok(Binding::Destructuring(entries))
        })
    }

    /// One bracketed group. Positions count from zero within the group.
    ///
    /// - `name;` binds position `i`; `;` alone and `skip;` leave it unbound
    /// - `key => alias;` binds a record key and does not advance the position
    /// - `key => [ … ]` and `[ … ]` recurse into the key or position
    ///
    /// The `;` after a final entry, and after a nested group, is optional.
    fn parse_destructure_group(
        &mut self,
        prefix: &KeyPath,
        out: &mut Vec<DestructureEntry>,
    ) -> Result<(), ParseError> {
        self.expect(TokenKind::LBracket)?;
        let mut index = 0usize;

        while !self.check(TokenKind::RBracket) {
            match self.cursor.current_kind() {
                TokenKind::Ident => {
                    let name = self.cursor.expect_ident("a binding name")?.to_owned();
                    if self.eat(TokenKind::Arrow) {
                        let path = child(prefix, name);
                        match self.cursor.current_kind() {
                            TokenKind::Ident => {
                                let alias = self.cursor.expect_ident("an alias")?.to_owned();
                                self.expect(TokenKind::Semicolon)?;
                                out.push(DestructureEntry { path, alias });
                            }
                            TokenKind::LBracket => self.parse_nested_group(&path, out)?,
                            _ => return Err(self.cursor.unexpected("an alias or \"[\" after \"=>\"")),
                        }
                    } else if self.eat(TokenKind::Semicolon) || self.check(TokenKind::RBracket) {
                        out.push(DestructureEntry {
                            path: child(prefix, index.to_string()),
                            alias: name,
                        });
                        index += 1;
                    } else {
                        return Err(self.cursor.unexpected("\"=>\", \";\" or \"]\" after the name"));
                    }
                }
                TokenKind::LBracket => {
                    self.parse_nested_group(&child(prefix, index.to_string()), out)?;
                    index += 1;
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    index += 1;
                }
                TokenKind::Skip => {
                    self.cursor.advance();
                    if !self.check(TokenKind::RBracket) {
                        self.expect(TokenKind::Semicolon)?;
                    }
                    index += 1;
                }
                _ => {
                    return Err(self
                        .cursor
                        .unexpected("a name, \"[\", \"skip\" or \";\" in the pattern"))
                }
            }
        }
        self.expect(TokenKind::RBracket)
    }

    fn parse_nested_group(
        &mut self,
        prefix: &KeyPath,
        out: &mut Vec<DestructureEntry>,
    ) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.parse_destructure_group(prefix, out))?;
        self.eat(TokenKind::Semicolon);
        Ok(())
    }
}

fn opens_destructuring(next: TokenKind) -> bool {
    matches!(
        next,
        TokenKind::Ident | TokenKind::LBracket | TokenKind::Semicolon | TokenKind::Skip
    )
}

fn child(prefix: &KeyPath, segment: String) -> KeyPath {
    let mut path = prefix.clone();
    path.push(segment);
    path
}
