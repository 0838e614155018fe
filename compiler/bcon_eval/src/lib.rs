//! BCON evaluator.
//!
//! Walks a parsed [`Module`](bcon_ir::Module) and produces a [`Value`]:
//! registers classes with their inheritance flattened, loads imports,
//! evaluates `use` bindings, then the exported expression. Class instances
//! are validated structurally when they are built.
//!
//! [`parse_source`] runs the whole pipeline (lex, parse, evaluate) on a
//! string; [`ImportSession`] does the same while keeping an import cache.

pub mod errors;
mod import;
pub mod interpreter;

use bcon_ir::{Config, FileSystem, Value};

pub use errors::{Error, EvalError, EvalErrorKind};
pub use import::{ImportLoader, ImportSession, SharedImportCache};
pub use interpreter::{EvalContext, Interpreter};

/// Lex, parse and evaluate `source`.
///
/// File literals and imports resolve against `config.default_path` and are
/// read through `fs`.
pub fn parse_source(source: &str, config: &Config, fs: &dyn FileSystem) -> Result<Value, Error> {
    ImportSession::new(config, fs).evaluate_source(source)
}

/// [`parse_source`] with an import cache that outlives the call.
pub fn parse_source_cached(
    source: &str,
    config: &Config,
    fs: &dyn FileSystem,
    cache: SharedImportCache,
) -> Result<Value, Error> {
    ImportSession::new(config, fs)
        .with_cache(cache)
        .evaluate_source(source)
}
