use std::fmt;

use crate::span_utils::LineOffsetTable;
use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// 1-based source position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// A rendered-ready report: code, message, optional position, notes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
    /// Secondary context, e.g. the chain of imports that led here.
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            location: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = Some(Location { line, column });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render with a source excerpt and caret under the reported column.
    ///
    /// `origin` names the file in the `-->` line when known.
    pub fn render(&self, source: Option<&str>, origin: Option<&str>) -> String {
        use std::fmt::Write as _;

        let mut out = format!("{}[{}]: {}\n", self.severity, self.code, self.message);
        if let Some(Location { line, column }) = self.location {
            let origin = origin.unwrap_or("<input>");
            let _ = writeln!(out, "  --> {origin}:{line}:{column}");
            if let Some(source) = source {
                let table = LineOffsetTable::build(source);
                if let Some(text) = table.line_text(source, line as usize) {
                    let gutter = line.to_string().len();
                    let pad = " ".repeat(gutter);
                    let _ = writeln!(out, "{pad} |");
                    let _ = writeln!(out, "{line} | {text}");
                    let caret = " ".repeat(column.saturating_sub(1) as usize);
                    let _ = writeln!(out, "{pad} | {caret}^");
                }
            }
        }
        for note in &self.notes {
            let _ = writeln!(out, "  = note: {note}");
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(Location { line, column }) = self.location {
            write!(f, " at {line}:{column}")?;
        }
        Ok(())
    }
}

/// Conversion into a [`Diagnostic`], implemented by every stage error.
pub trait IntoDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
