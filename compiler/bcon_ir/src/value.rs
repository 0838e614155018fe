//! Runtime values produced by evaluation.
//!
//! Class instances are plain records: validation is structural and happens
//! once, at construction, so no class identity is kept on the value.

mod record;

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;

use crate::Encoding;

pub use record::Record;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    BigInt(BigInt),
    String(String),
    Date(DateTime<Utc>),
    RegExp(RegExpValue),
    Buffer(Buffer),
    Array(Vec<Value>),
    Object(Record),
}

impl Value {
    /// Null or undefined, the two values the `?` operator skips.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Kind name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "BigInt",
            Value::String(_) => "string",
            Value::Date(_) => "Date",
            Value::RegExp(_) => "RegExp",
            Value::Buffer(_) => "Buffer",
            Value::Array(_) => "Array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// One step of key-path traversal.
    ///
    /// Records look the key up by name; sequences accept decimal indices.
    /// Anything else, or a missing entry, yields `None`.
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(record) => record.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Host string conversion, used by interpolation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Undefined => "undefined".to_owned(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::BigInt(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Date(d) => d.to_rfc3339_opts(SecondsFormat::Millis, true),
            Value::RegExp(re) => re.to_string(),
            Value::Buffer(buf) => buf.to_text(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.to_display_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_owned(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// A regular expression literal: pattern source plus flag letters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegExpValue {
    pub source: String,
    pub flags: String,
}

impl RegExpValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        RegExpValue {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

impl fmt::Display for RegExpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Contents of a file literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Buffer {
    pub bytes: Vec<u8>,
    /// Encoding named by the literal; governs the text form.
    pub encoding: Encoding,
}

impl Buffer {
    pub fn new(bytes: Vec<u8>, encoding: Encoding) -> Self {
        Buffer { bytes, encoding }
    }

    /// Text form in the declared encoding; invalid sequences are replaced.
    pub fn to_text(&self) -> String {
        self.encoding
            .decode(&self.bytes)
            .unwrap_or_else(|_| String::from_utf8_lossy(&self.bytes).into_owned())
    }
}

/// Format a number the way the host language prints it: integers without a
/// fractional part, `NaN`, `Infinity`, and exponent form outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

#[cfg(test)]
mod tests;
