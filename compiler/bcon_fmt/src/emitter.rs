//! Output emitter.
//!
//! The serializer writes through [`Emitter`] so the same walk can build a
//! string or stream into any [`std::fmt::Write`] sink.

use std::fmt;

/// Destination for serialized text.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a single character.
    fn emit_char(&mut self, c: char);

    /// Emit a newline (`\n`).
    fn emit_newline(&mut self) {
        self.emit_char('\n');
    }

    /// Emit `width` spaces for each nesting `level`.
    fn emit_indent(&mut self, level: usize, width: usize) {
        for _ in 0..level * width {
            self.emit_char(' ');
        }
    }
}

/// In-memory emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the output.
    pub fn output(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_char(&mut self, c: char) {
        self.buffer.push(c);
    }
}

/// Adapter over any [`fmt::Write`]; the first write error is kept and later
/// output is dropped.
pub struct WriteEmitter<W> {
    writer: W,
    error: Option<fmt::Error>,
}

impl<W: fmt::Write> WriteEmitter<W> {
    pub fn new(writer: W) -> Self {
        WriteEmitter {
            writer,
            error: None,
        }
    }

    /// Return the writer, or the first error met while writing.
    pub fn finish(self) -> Result<W, fmt::Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writer),
        }
    }
}

impl<W: fmt::Write> Emitter for WriteEmitter<W> {
    fn emit(&mut self, text: &str) {
        if self.error.is_none() {
            self.error = self.writer.write_str(text).err();
        }
    }

    fn emit_char(&mut self, c: char) {
        if self.error.is_none() {
            self.error = self.writer.write_char(c).err();
        }
    }
}
