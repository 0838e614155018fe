//! Recursive descent parser for BCON.
//!
//! Turns a [`TokenList`] into a [`Module`]. Literal tokens are decoded here
//! (numbers, dates, regexes, file references) so a malformed literal fails at
//! its own position. Parsing stops at the first error; there is no recovery.

mod cursor;
mod error;
mod grammar;

use bcon_ir::ast::Module;
use bcon_ir::{Config, FileSystem, Span, TokenKind, TokenList};

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

/// Parser state.
///
/// File literals are resolved against `config.default_path` and checked
/// through `fs` while parsing.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: &'a Config,
    fs: &'a dyn FileSystem,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, config: &'a Config, fs: &'a dyn FileSystem) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            config,
            fs,
        }
    }

    /// Run `f`, tagging any error it returns with `context`.
    #[inline]
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|err| err.with_context(context))
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        self.cursor.expect(kind).map(|_| ())
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }
}

/// Parse a whole module.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(
    tokens: &TokenList,
    config: &Config,
    fs: &dyn FileSystem,
) -> Result<Module, ParseError> {
    let module = Parser::new(tokens, config, fs).parse_module()?;
    tracing::debug!(
        imports = module.imports.len(),
        uses = module.uses.len(),
        classes = module.classes.len(),
        "parsed module"
    );
    Ok(module)
}
