//! Import loading.
//!
//! An [`ImportSession`] evaluates a root source and every file it imports,
//! transitively. Each imported file is evaluated at most once per cache: the
//! cache is keyed by absolute path and may be shared between sessions, and
//! across threads, through [`SharedImportCache`].

use std::path::PathBuf;
use std::sync::Arc;

use bcon_diagnostic::span_utils::LineOffsetTable;
use bcon_diagnostic::Location;
use bcon_ir::ast::FileRef;
use bcon_ir::{Config, FileSystem, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{decode_error, import_cycle, import_failed, io_error, Error, EvalError};
use crate::interpreter::Interpreter;

/// Evaluated imports by absolute path.
pub type SharedImportCache = Arc<RwLock<FxHashMap<PathBuf, Value>>>;

/// Produces the value of an imported file.
pub trait ImportLoader {
    fn load(&mut self, file: &FileRef) -> Result<Value, EvalError>;
}

/// One run of the pipeline over a root source and its imports.
pub struct ImportSession<'a> {
    config: &'a Config,
    fs: &'a dyn FileSystem,
    cache: SharedImportCache,
    /// Files currently being evaluated, outermost first.
    in_progress: Vec<PathBuf>,
}

impl<'a> ImportSession<'a> {
    pub fn new(config: &'a Config, fs: &'a dyn FileSystem) -> Self {
        ImportSession {
            config,
            fs,
            cache: SharedImportCache::default(),
            in_progress: Vec::new(),
        }
    }

    /// Reuse `cache`, so files already evaluated by another session are not
    /// read again.
    #[must_use]
    pub fn with_cache(mut self, cache: SharedImportCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &SharedImportCache {
        &self.cache
    }

    /// Lex, parse and evaluate `source`, loading its imports through this
    /// session.
    pub fn evaluate_source(&mut self, source: &str) -> Result<Value, Error> {
        let tokens = bcon_lexer::lex(source)?;
        let module = bcon_parse::parse(&tokens, self.config, self.fs)?;
        let fs = self.fs;
        Interpreter::new(self, fs)
            .evaluate(&module)
            .map_err(|err| Error::Eval(locate(err, tokens.source())))
    }
}

impl ImportLoader for ImportSession<'_> {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %file.path.display()))]
    fn load(&mut self, file: &FileRef) -> Result<Value, EvalError> {
        if let Some(value) = self.cache.read().get(&file.path) {
            tracing::trace!("import cache hit");
            return Ok(value.clone());
        }
        if self.in_progress.contains(&file.path) {
            let mut chain = self.in_progress.clone();
            chain.push(file.path.clone());
            return Err(import_cycle(chain));
        }

        let bytes = self
            .fs
            .read(&file.path)
            .map_err(|err| io_error(&file.path, &err))?;
        let source = file
            .encoding
            .decode(&bytes)
            .map_err(|err| decode_error(&file.path, err))?;

        self.in_progress.push(file.path.clone());
        let result = self.evaluate_source(&source);
        self.in_progress.pop();

        let value = result.map_err(|err| import_failed(&file.path, err))?;
        self.cache.write().insert(file.path.clone(), value.clone());
        tracing::debug!("import evaluated");
        Ok(value)
    }
}

/// Fill in the error's line and column from its span.
fn locate(mut err: EvalError, source: &str) -> EvalError {
    if let (Some(span), None) = (err.span, err.location) {
        let table = LineOffsetTable::build(source);
        let (line, column) = table.offset_to_line_col(source, span.start as usize);
        err.location = Some(Location {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u32::try_from(column).unwrap_or(u32::MAX),
        });
    }
    err
}
