//! Type expressions attached to class fields.

use std::fmt;

use crate::ast::ClassField;

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    /// Primitive or class name.
    Reference(String),
    /// Inline record shape: `[ @host: String; @port?: Number = 80; ]`
    Object(Vec<ClassField>),
    /// Homogeneous sequence; `None` leaves elements unchecked.
    Array(Option<Box<TypeExpr>>),
    /// Fixed arity, positional types.
    Tuple(Vec<TypeExpr>),
    /// Exact string value.
    Literal(String),
}

impl TypeExpr {
    /// `Any`, used when a field omits its annotation.
    pub fn any() -> Self {
        TypeExpr::Reference("Any".to_owned())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Reference(name) => f.write_str(name),
            TypeExpr::Object(fields) => {
                f.write_str("[")?;
                for field in fields {
                    let opt = if field.optional { "?" } else { "" };
                    write!(f, " @{}{opt}: {};", field.name, field.ty)?;
                }
                f.write_str(" ]")
            }
            TypeExpr::Array(None) => f.write_str("[]"),
            TypeExpr::Array(Some(elem)) => write!(f, "[{elem}]"),
            TypeExpr::Tuple(elems) => {
                f.write_str("[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{elem};")?;
                }
                f.write_str("]")
            }
            TypeExpr::Literal(value) => write!(f, "\"{value}\""),
        }
    }
}
