//! Syntax tree for a BCON module.
//!
//! The parser produces one [`Module`] per source file. Literal tokens are
//! already decoded (numbers parsed, dates resolved, file paths made absolute),
//! so the evaluator never looks at raw token text except for string bodies,
//! whose escapes and placeholders are processed at evaluation time.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use smallvec::SmallVec;

use crate::value::RegExpValue;
use crate::{Encoding, Span, TypeExpr};

/// Key path used by dotted references and destructuring.
///
/// Numeric segments stay strings; they become indices only when the value
/// being walked is a sequence.
pub type KeyPath = SmallVec<[String; 4]>;

/// A parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub imports: Vec<ImportDecl>,
    pub uses: Vec<UseDecl>,
    pub classes: Vec<ClassDecl>,
    /// The exported expression.
    pub body: Expr,
}

/// `import "file".enc as binding;` or `import [bindings] from "file".enc;`
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    pub source: FileRef,
    pub binding: Binding,
    pub span: Span,
}

/// `use value as binding;` or `use [bindings] from value;`
#[derive(Clone, Debug, PartialEq)]
pub struct UseDecl {
    pub value: Expr,
    pub binding: Binding,
    pub span: Span,
}

/// `class Name (params) extends Base includes M1 M2 [ fields ];`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub parameters: Vec<Param>,
    pub base: Option<String>,
    pub mixins: Vec<String>,
    pub fields: Vec<ClassField>,
    pub span: Span,
}

/// Constructor parameter. A spread parameter collects the remaining arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub spread: bool,
}

/// `@name?: Type => default;`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassField {
    pub name: String,
    pub ty: TypeExpr,
    pub optional: bool,
    pub default: Option<Expr>,
    pub span: Span,
}

impl ClassField {
    /// A field that must be supplied: neither optional nor defaulted.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }
}

/// Target of an import or `use`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Ident(String),
    Destructuring(Vec<DestructureEntry>),
}

/// One leaf of a destructuring pattern: bind the value at `path` to `alias`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DestructureEntry {
    pub path: KeyPath,
    pub alias: String,
}

/// A resolved file literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    /// Absolute, lexically normalized path.
    pub path: PathBuf,
    pub encoding: Encoding,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(String),
    /// Dotted reference; the first segment may be `Main` or `This`.
    Path(KeyPath),
    Literal(Literal),
    Container(Container),
    /// `Point(1, 2, ...rest)`
    ConstructorCall {
        class: String,
        args: Vec<Argument>,
    },
    /// `Config [ @host => "x"; ]`
    ClassInstance {
        class: String,
        body: Container,
    },
    /// `left ? right`: `left` unless it is null or undefined.
    Conditional {
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub value: Expr,
    pub spread: bool,
}

/// Bracketed literal body.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub kind: ContainerKind,
    pub members: Vec<Member>,
}

/// Record vs sequence, fixed by the first keyed member.
///
/// `Unknown` bodies contain only spreads (or nothing); their kind is decided
/// at evaluation time from the first spread argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Object,
    Array,
    Unknown,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Object => f.write_str("object"),
            ContainerKind::Array => f.write_str("array"),
            ContainerKind::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    /// `@key => value;`
    Property { key: String, value: Expr },
    /// `@* => value;`
    Element { value: Expr },
    /// `...argument;`
    Spread { argument: Expr },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// Raw string body between the quotes; escapes and `[path]` placeholders
    /// are processed during evaluation.
    String(String),
    Number(f64),
    BigInt(BigInt),
    Boolean(bool),
    Null,
    Undefined,
    Date(DateTime<Utc>),
    File(FileRef),
    RegExp(RegExpValue),
}
