//! Evaluation configuration and text encodings.
//!
//! A [`Config`] is created once at the outermost entry point and passed by
//! reference through lexer, parser, and evaluator. There is no global state.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine as _;

/// Encodings accepted by file literals and the configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Base64,
    Ascii,
    Latin1,
    Binary,
    Hex,
}

impl Encoding {
    /// Parse an encoding name. Matching ignores case and `-`, so `UTF-8`,
    /// `utf8` and `Utf-8` are the same encoding.
    pub fn parse(name: &str) -> Option<Encoding> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Some(Encoding::Utf8),
            "utf16le" => Some(Encoding::Utf16Le),
            "base64" => Some(Encoding::Base64),
            "ascii" => Some(Encoding::Ascii),
            "latin1" => Some(Encoding::Latin1),
            "binary" => Some(Encoding::Binary),
            "hex" => Some(Encoding::Hex),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Base64 => "base64",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
            Encoding::Binary => "binary",
            Encoding::Hex => "hex",
        }
    }

    /// Turn raw file bytes into text.
    ///
    /// `base64` and `hex` render the bytes in that notation rather than
    /// decoding them; `latin1` and `binary` map each byte to one code point.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| DecodeError::InvalidUtf8 {
                    offset: e.valid_up_to(),
                }),
            Encoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(DecodeError::OddUtf16Length { len: bytes.len() });
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16)
            }
            Encoding::Ascii => Ok(bytes.iter().map(|b| char::from(b & 0x7f)).collect()),
            Encoding::Latin1 | Encoding::Binary => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Base64 => Ok(base64::engine::general_purpose::STANDARD.encode(bytes)),
            Encoding::Hex => {
                use std::fmt::Write as _;
                let mut out = String::with_capacity(bytes.len() * 2);
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                Ok(out)
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 after byte {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("UTF-16LE input has odd length {len}")]
    OddUtf16Length { len: usize },
    #[error("invalid UTF-16LE sequence")]
    InvalidUtf16,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("directory \"{}\" does not exist", .path.display())]
    DirectoryNotFound { path: PathBuf },
    #[error("\"{}\" is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
    #[error("encoding \"{name}\" is not supported")]
    UnknownEncoding { name: String },
}

/// Where relative file literals resolve, and how top-level files are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base directory for relative file and import paths.
    pub default_path: PathBuf,
    /// Encoding used when reading a top-level source file.
    pub default_encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            default_encoding: Encoding::Utf8,
        }
    }
}

impl Config {
    /// Config rooted at `default_path`, without touching the file system.
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        Config {
            default_path: default_path.into(),
            default_encoding: Encoding::Utf8,
        }
    }

    /// Set the base directory. It must exist and be a directory; the stored
    /// path is absolute.
    pub fn with_default_path(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.default_path.join(path)
        };
        let metadata = std::fs::metadata(&absolute).map_err(|_| ConfigError::DirectoryNotFound {
            path: absolute.clone(),
        })?;
        if !metadata.is_dir() {
            return Err(ConfigError::NotADirectory { path: absolute });
        }
        self.default_path = std::fs::canonicalize(&absolute).unwrap_or(absolute);
        tracing::debug!(path = %self.default_path.display(), "default path set");
        Ok(self)
    }

    pub fn with_default_encoding(mut self, name: &str) -> Result<Self, ConfigError> {
        self.default_encoding = Encoding::parse(name).ok_or_else(|| ConfigError::UnknownEncoding {
            name: name.to_owned(),
        })?;
        Ok(self)
    }
}
