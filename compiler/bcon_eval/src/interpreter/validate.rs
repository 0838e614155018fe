//! Structural type checks for class fields.
//!
//! Errors carry a dotted path rooted at the class name, extended with
//! `.field` for record members and `[i]` for sequence elements.

use std::fmt::Write as _;

use bcon_ir::ast::ClassField;
use bcon_ir::{format_number, Record, TypeExpr, Value};
use bcon_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{
    literal_mismatch, missing_nested_field, tuple_length, type_mismatch, unknown_nested_fields,
    unknown_type, EvalError,
};

impl Interpreter<'_> {
    pub(super) fn validate(&self, value: &Value, ty: &TypeExpr, path: &str) -> Result<(), EvalError> {
        ensure_sufficient_stack(|| match ty {
            TypeExpr::Reference(name) => self.validate_reference(value, name, path),
            TypeExpr::Object(fields) => {
                let record = value
                    .as_record()
                    .ok_or_else(|| type_mismatch(path, "object", value.type_name()))?;
                self.validate_shape(record, fields, path, None)
            }
            TypeExpr::Array(element) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| type_mismatch(path, "array", value.type_name()))?;
                if let Some(element) = element {
                    for (i, item) in items.iter().enumerate() {
                        self.validate(item, element, &format!("{path}[{i}]"))?;
                    }
                }
                Ok(())
            }
            TypeExpr::Tuple(elements) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| type_mismatch(path, "tuple", value.type_name()))?;
                if items.len() != elements.len() {
                    return Err(tuple_length(path, elements.len(), items.len()));
                }
                for (i, (item, element)) in items.iter().zip(elements).enumerate() {
                    self.validate(item, element, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            TypeExpr::Literal(expected) => match value {
                Value::String(s) if s == expected => Ok(()),
                _ => Err(literal_mismatch(path, expected, json_repr(value))),
            },
        })
    }

    /// Built-in names first, then registered classes.
    fn validate_reference(&self, value: &Value, name: &str, path: &str) -> Result<(), EvalError> {
        if let Some(matches) = primitive_matches(name, value) {
            return if matches {
                Ok(())
            } else {
                Err(type_mismatch(path, name, value.type_name()))
            };
        }

        let def = self.classes.get(name).ok_or_else(|| unknown_type(name))?;
        let record = value
            .as_record()
            .ok_or_else(|| type_mismatch(path, format!("instance of {name}"), value.type_name()))?;
        self.validate_shape(record, &def.fields, path, Some(name))
    }

    /// Present fields are checked recursively, absent ones must be optional
    /// or defaulted, and undeclared keys are rejected together.
    ///
    /// Defaults are not applied here; nested values are checked as written.
    fn validate_shape(
        &self,
        record: &Record,
        fields: &[ClassField],
        path: &str,
        class: Option<&str>,
    ) -> Result<(), EvalError> {
        for field in fields {
            match record.get(&field.name) {
                Some(value) => self.validate(value, &field.ty, &format!("{path}.{}", field.name))?,
                None if field.is_required() => {
                    return Err(missing_nested_field(&field.name, path, class))
                }
                None => {}
            }
        }

        let extra: Vec<String> = record
            .keys()
            .filter(|key| !fields.iter().any(|f| f.name == *key))
            .map(str::to_owned)
            .collect();
        if extra.is_empty() {
            Ok(())
        } else {
            Err(unknown_nested_fields(path, extra, class))
        }
    }
}

/// `Some(matches)` for built-in type names, `None` for anything else.
///
/// `String` also accepts file contents, which print as text.
fn primitive_matches(name: &str, value: &Value) -> Option<bool> {
    Some(match name {
        "String" => matches!(value, Value::String(_) | Value::Buffer(_)),
        "Number" => matches!(value, Value::Number(n) if !n.is_nan()),
        "Boolean" => matches!(value, Value::Boolean(_)),
        "BigInt" => matches!(value, Value::BigInt(_)),
        "Date" => matches!(value, Value::Date(_)),
        "RegExp" => matches!(value, Value::RegExp(_)),
        "Array" => matches!(value, Value::Array(_)),
        "Object" => matches!(value, Value::Object(_)),
        "Any" => true,
        "Null" => matches!(value, Value::Null),
        "Undefined" => matches!(value, Value::Undefined),
        _ => return None,
    })
}

/// Compact JSON-style rendering used to quote offending values.
///
/// Non-finite numbers print as `null`; `undefined` record members are
/// skipped and `undefined` elements print as `null`.
pub fn json_repr(value: &Value) -> String {
    let mut out = String::new();
    write_json(&mut out, value, true);
    out
}

fn write_json(out: &mut String, value: &Value, top: bool) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Undefined if top => out.push_str("undefined"),
        Value::Undefined => out.push_str("null"),
        Value::Boolean(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Number(n) if n.is_finite() => out.push_str(&format_number(*n)),
        Value::Number(_) => out.push_str("null"),
        Value::BigInt(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(_) | Value::Date(_) | Value::Buffer(_) => {
            write_json_string(out, &value.to_display_string());
        }
        Value::RegExp(_) => out.push_str("{}"),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(out, item, false);
            }
            out.push(']');
        }
        Value::Object(record) => {
            out.push('{');
            let mut first = true;
            for (key, item) in record.iter().filter(|(_, v)| !matches!(v, Value::Undefined)) {
                if !first {
                    out.push(',');
                }
                first = false;
                write_json_string(out, key);
                out.push(':');
                write_json(out, item, false);
            }
            out.push('}');
        }
    }
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_repr_of_values() {
        assert_eq!(json_repr(&Value::from("a\"b")), r#""a\"b""#);
        assert_eq!(json_repr(&Value::Number(3.0)), "3");
        assert_eq!(json_repr(&Value::Number(f64::NAN)), "null");
        assert_eq!(json_repr(&Value::Undefined), "undefined");
        let record: Record = [
            ("a", Value::Number(1.0)),
            ("skip", Value::Undefined),
            ("b", Value::Array(vec![Value::Undefined, Value::Boolean(true)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(json_repr(&Value::Object(record)), r#"{"a":1,"b":[null,true]}"#);
    }

    #[test]
    fn primitive_names() {
        assert_eq!(primitive_matches("Number", &Value::Number(f64::NAN)), Some(false));
        assert_eq!(primitive_matches("Any", &Value::Undefined), Some(true));
        assert_eq!(primitive_matches("Point", &Value::Null), None);
    }
}
