//! Command handlers for the `bcon` CLI.
//!
//! Each handler returns the text to print on success, or a [`CommandError`]
//! whose `Display` is the full report for stderr. Shared option parsing and
//! file loading live here in the module root.

use std::io;
use std::path::{Path, PathBuf};

use bcon_diagnostic::IntoDiagnostic;
use bcon_ir::{Config, ConfigError, DecodeError};
use thiserror::Error;

mod check;
mod eval;
mod lex;

pub use check::check_file;
pub use eval::eval_file;
pub use lex::lex_file;

/// Options shared by the file commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// `--path`: base directory for imports and file literals. Defaults to
    /// the directory holding the input file.
    pub path: Option<PathBuf>,
    /// `--encoding`: how the input file is decoded.
    pub encoding: Option<String>,
    /// `--indent`: spaces per level in `eval` output.
    pub indent: usize,
}

/// Parse `--path DIR`, `--encoding ENC` and `--indent N` (also written
/// `--flag=value`) from `args`.
pub fn parse_options(args: &[String]) -> Result<Options, CommandError> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if !arg.starts_with("--") {
            return Err(CommandError::Usage(format!("unexpected argument \"{arg}\"")));
        }
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg, None),
        };
        let value = match inline {
            Some(value) => value.to_owned(),
            None => {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| CommandError::Usage(format!("{flag} needs a value")))?
            }
        };
        match flag {
            "--path" => options.path = Some(PathBuf::from(value)),
            "--encoding" => options.encoding = Some(value),
            "--indent" => {
                options.indent = value.parse().map_err(|_| {
                    CommandError::Usage(format!("--indent expects a number, got \"{value}\""))
                })?;
            }
            _ => return Err(CommandError::Usage(format!("unknown option \"{flag}\""))),
        }
        i += 1;
    }
    Ok(options)
}

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read \"{}\": {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot decode \"{}\": {source}", .path.display())]
    Decode { path: PathBuf, source: DecodeError },

    /// A pipeline failure, already rendered with its source excerpt.
    #[error("{0}")]
    Rendered(String),

    #[error(transparent)]
    Stringify(#[from] bcon_fmt::StringifyError),
}

/// An input file loaded with the configuration it should be evaluated under.
pub(crate) struct Input {
    pub origin: String,
    pub text: String,
    pub config: Config,
}

impl Input {
    /// Build the configuration from `options`, then read and decode `path`.
    pub(crate) fn load(path: &str, options: &Options) -> Result<Self, CommandError> {
        let file = Path::new(path);
        let mut config = Config::default();
        let base = match &options.path {
            Some(dir) => Some(dir.as_path()),
            None => file.parent().filter(|dir| !dir.as_os_str().is_empty()),
        };
        if let Some(base) = base {
            config = config.with_default_path(base)?;
        }
        if let Some(name) = &options.encoding {
            config = config.with_default_encoding(name)?;
        }

        let bytes = std::fs::read(file).map_err(|source| CommandError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let text = config
            .default_encoding
            .decode(&bytes)
            .map_err(|source| CommandError::Decode {
                path: file.to_path_buf(),
                source,
            })?;

        Ok(Input {
            origin: path.to_owned(),
            text,
            config,
        })
    }

    /// Render a pipeline error against this input.
    pub(crate) fn report(&self, err: &impl IntoDiagnostic) -> CommandError {
        let rendered = err
            .to_diagnostic()
            .render(Some(&bcon_lexer::normalize_newlines(&self.text)), Some(&self.origin));
        CommandError::Rendered(rendered)
    }
}
