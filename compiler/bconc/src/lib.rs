//! BCON: a typed configuration language.
//!
//! This crate ties the pipeline together and is the entry point for
//! embedders and for the `bcon` binary.
//!
//! # Architecture
//!
//! ```text
//! source text
//!     │
//!     ▼
//! bcon_lexer::lex() ──► TokenList
//!     │
//!     ▼
//! bcon_parse::parse() ──► Module      (imports loaded through ImportSession)
//!     │
//!     ▼
//! Interpreter::evaluate() ──► Value
//!     │
//!     ▼
//! bcon_fmt::stringify() ──► source text
//! ```
//!
//! # Example
//!
//! ```text
//! let config = Config::default().with_default_path("conf")?;
//! let value = bconc::parse_file("conf/app.bcon", &config)?;
//! println!("{}", bconc::stringify(&value, None, 2)?);
//! ```

pub mod commands;

use std::path::Path;
use std::sync::Once;

use bcon_eval::errors::{decode_error, io_error};

pub use bcon_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic};
pub use bcon_eval::{parse_source_cached, Error, EvalError, EvalErrorKind, SharedImportCache};
pub use bcon_fmt::{stringify, Replacer, StringifyError};
pub use bcon_ir::{
    Config, ConfigError, Encoding, FileSystem, MemoryFileSystem, OsFileSystem, Record, Value,
};

/// Evaluate `source`, reading file literals and imports from disk.
pub fn parse(source: &str, config: &Config) -> Result<Value, Error> {
    bcon_eval::parse_source(source, config, &OsFileSystem)
}

/// [`parse`] against a caller-supplied file system.
pub fn parse_with(source: &str, config: &Config, fs: &dyn FileSystem) -> Result<Value, Error> {
    bcon_eval::parse_source(source, config, fs)
}

/// Read, decode and evaluate the file at `path`.
///
/// A relative `path` is taken from `config.default_path`, as are the
/// file's own imports; the file is decoded with `config.default_encoding`.
pub fn parse_file(path: impl AsRef<Path>, config: &Config) -> Result<Value, Error> {
    let source = read_source(path.as_ref(), config, &OsFileSystem)?;
    parse(&source, config)
}

/// Load a top-level source file as text.
pub fn read_source(path: &Path, config: &Config, fs: &dyn FileSystem) -> Result<String, Error> {
    let path = config.default_path.join(path);
    let bytes = fs.read(&path).map_err(|err| io_error(&path, &err))?;
    let text = config
        .default_encoding
        .decode(&bytes)
        .map_err(|err| decode_error(&path, err))?;
    Ok(text)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=bcon_eval=debug` or `RUST_LOG=bcon_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
