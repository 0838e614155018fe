//! Value to source serialization.

use bcon_ir::{format_number, Value};
use bcon_stack::ensure_sufficient_stack;
use chrono::SecondsFormat;

use crate::emitter::Emitter;
use crate::{Replacer, StringifyError};

pub(crate) struct Stringifier<'a, E: Emitter> {
    emitter: &'a mut E,
    replacer: Option<Replacer<'a>>,
    /// Spaces per level; `0` writes everything on one line.
    indent: usize,
    /// Set once an empty sequence has been written as [`EMPTY_SEQUENCE`].
    wrote_empty_sequence: bool,
}

/// `[]` evaluates to an empty record, so an empty sequence is written as a
/// reference to a rest parameter bound with no arguments.
const EMPTY_SEQUENCE: &str = "empty.items";

/// Declarations that give [`EMPTY_SEQUENCE`] its meaning.
const EMPTY_SEQUENCE_PRELUDE: [&str; 2] = [
    "class EmptyList(...items) [@items => items;];",
    "use EmptyList() as empty;",
];

/// Write the declarations behind [`EMPTY_SEQUENCE`], one per line when
/// indenting.
pub(crate) fn empty_sequence_prelude<E: Emitter>(emitter: &mut E, indent: usize) {
    for line in EMPTY_SEQUENCE_PRELUDE {
        emitter.emit(line);
        if indent > 0 {
            emitter.emit_newline();
        }
    }
}

impl<'a, E: Emitter> Stringifier<'a, E> {
    pub(crate) fn new(emitter: &'a mut E, replacer: Option<Replacer<'a>>, indent: usize) -> Self {
        Stringifier {
            emitter,
            replacer,
            indent,
            wrote_empty_sequence: false,
        }
    }

    /// Whether the output refers to [`EMPTY_SEQUENCE`].
    pub(crate) fn wrote_empty_sequence(&self) -> bool {
        self.wrote_empty_sequence
    }

    /// `export <container>;`
    pub(crate) fn module(&mut self, value: &Value) -> Result<(), StringifyError> {
        if !is_container(value) {
            return Err(StringifyError::NotAContainer {
                found: value.type_name(),
            });
        }
        self.emitter.emit("export ");
        self.container(value, 0, true)?;
        self.emitter.emit_char(';');
        Ok(())
    }

    /// `replace` is off while writing what the replacer returned, so its
    /// output is never fed back into it.
    fn container(&mut self, value: &Value, level: usize, replace: bool) -> Result<(), StringifyError> {
        if matches!(value, Value::Array(items) if items.is_empty()) {
            self.wrote_empty_sequence = true;
            self.emitter.emit(EMPTY_SEQUENCE);
            return Ok(());
        }
        ensure_sufficient_stack(|| {
            self.emitter.emit_char('[');
            let written = match value {
                Value::Array(items) => {
                    for item in items {
                        self.entry(None, item, level + 1, replace)?;
                    }
                    items.len()
                }
                Value::Object(record) => {
                    for (key, item) in record.iter() {
                        if !is_identifier(key) {
                            return Err(StringifyError::InvalidKey {
                                key: key.to_owned(),
                            });
                        }
                        self.entry(Some(key), item, level + 1, replace)?;
                    }
                    record.len()
                }
                _ => 0,
            };
            if written > 0 && self.indent > 0 {
                self.emitter.emit_newline();
                self.emitter.emit_indent(level, self.indent);
            }
            self.emitter.emit_char(']');
            Ok(())
        })
    }

    /// `@key => value;` or `@* => value;`
    fn entry(
        &mut self,
        key: Option<&str>,
        value: &Value,
        level: usize,
        replace: bool,
    ) -> Result<(), StringifyError> {
        if self.indent > 0 {
            self.emitter.emit_newline();
            self.emitter.emit_indent(level, self.indent);
        }
        self.emitter.emit_char('@');
        self.emitter.emit(key.unwrap_or("*"));
        self.emitter.emit(if self.indent > 0 { " => " } else { "=>" });
        self.value(value, level, replace)?;
        self.emitter.emit_char(';');
        Ok(())
    }

    /// Containers recurse; leaves go through the replacer first, once.
    fn value(&mut self, value: &Value, level: usize, replace: bool) -> Result<(), StringifyError> {
        if is_container(value) {
            return self.container(value, level, replace);
        }
        match self.replacer.filter(|_| replace) {
            Some(replacer) => {
                let replaced = replacer(value);
                if is_container(&replaced) {
                    self.container(&replaced, level, false)
                } else {
                    self.leaf(&replaced);
                    Ok(())
                }
            }
            None => {
                self.leaf(value);
                Ok(())
            }
        }
    }

    fn leaf(&mut self, value: &Value) {
        match value {
            Value::Null => self.emitter.emit("Null"),
            Value::Undefined => self.emitter.emit("Undefined"),
            Value::Boolean(true) => self.emitter.emit("True"),
            Value::Boolean(false) => self.emitter.emit("False"),
            Value::Number(n) => self.emitter.emit(&format_number(*n)),
            Value::BigInt(n) => {
                self.emitter.emit(&n.to_string());
                self.emitter.emit_char('n');
            }
            Value::String(s) => self.quoted(s),
            Value::Date(date) => {
                self.quoted(&date.to_rfc3339_opts(SecondsFormat::Millis, true));
                self.emitter.emit(".date");
            }
            Value::RegExp(re) => self.emitter.emit(&re.to_string()),
            Value::Buffer(buffer) => self.quoted(&buffer.to_text()),
            // Written by `container`.
            Value::Array(_) | Value::Object(_) => {}
        }
    }

    /// Quote `text` so that evaluating the literal gives `text` back:
    /// brackets are escaped so they never read as placeholders.
    fn quoted(&mut self, text: &str) {
        self.emitter.emit_char('"');
        for c in text.chars() {
            match c {
                '\\' => self.emitter.emit("\\\\"),
                '"' => self.emitter.emit("\\\""),
                '[' => self.emitter.emit("\\["),
                ']' => self.emitter.emit("\\]"),
                '\u{8}' => self.emitter.emit("\\b"),
                '\u{c}' => self.emitter.emit("\\f"),
                '\n' => self.emitter.emit("\\n"),
                '\r' => self.emitter.emit("\\r"),
                '\t' => self.emitter.emit("\\t"),
                '\u{b}' => self.emitter.emit("\\v"),
                c => self.emitter.emit_char(c),
            }
        }
        self.emitter.emit_char('"');
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Keys are written as `@key`, so they must lex as one identifier.
fn is_identifier(key: &str) -> bool {
    let mut bytes = key.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
