//! BCON IR: the data shared by every stage of the pipeline.
//!
//! - [`Span`], [`Token`], [`TokenList`]: lexer output
//! - [`ast`]: the parsed module, expressions and bindings
//! - [`TypeExpr`]: field type annotations
//! - [`Value`]: evaluation results
//! - [`Config`], [`Encoding`]: explicit configuration, no globals
//! - [`FileSystem`]: the file access seam for imports and file literals

pub mod ast;
mod config;
pub mod fs;
mod span;
mod token;
mod ty;
pub mod value;

pub use ast::{
    Argument, Binding, ClassDecl, ClassField, Container, ContainerKind, DestructureEntry, Expr,
    ExprKind, FileRef, ImportDecl, KeyPath, Literal, Member, Module, Param, UseDecl,
};
pub use config::{Config, ConfigError, DecodeError, Encoding};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use ty::TypeExpr;
pub use value::{format_number, Buffer, Record, RegExpValue, Value};
