//! Evaluation errors and their constructors.
//!
//! Constructors are `#[cold]` free functions so the happy path in the
//! interpreter stays small. Messages follow one shape per failure so hosts
//! can match on [`EvalErrorKind`] and users see stable text.

use std::fmt;
use std::path::{Path, PathBuf};

use bcon_diagnostic::{Diagnostic, ErrorCode, IntoDiagnostic, Location};
use bcon_ir::{DecodeError, Span};
use bcon_lexer::LexError;
use bcon_parse::ParseError;

/// Any failure of the lex, parse, evaluate pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl IntoDiagnostic for Error {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Lex(err) => err.to_diagnostic(),
            Error::Parse(err) => err.to_diagnostic(),
            Error::Eval(err) => err.to_diagnostic(),
        }
    }
}

/// An evaluation failure.
///
/// `span` is the innermost expression or declaration being evaluated when
/// the error was raised; `location` is filled in from it once the source
/// text is at hand.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    pub location: Option<Location>,
    pub notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    // Reference and usage
    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("Class \"{name}\" not found")]
    UnknownClass { name: String },
    #[error("Base class \"{name}\" not found")]
    UnknownBaseClass { name: String },
    #[error("Mixin class \"{name}\" not found")]
    UnknownMixin { name: String },
    #[error("Class \"{class}\" is a validator and cannot be called with arguments")]
    ValidatorWithArguments { class: String },
    #[error("Class \"{class}\" is a constructor and requires arguments")]
    ConstructorWithoutArguments { class: String },
    #[error("Cannot spread non-array value in array (got {found})")]
    SpreadIntoArray { found: &'static str },
    #[error("Cannot spread non-object value in object (got {found})")]
    SpreadIntoObject { found: &'static str },
    #[error("Spread operator can only be used with arrays (got {found})")]
    SpreadArgument { found: &'static str },

    // Type validation
    #[error("Type mismatch at {path}: expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: &'static str,
    },
    #[error("Tuple length mismatch at {path}: expected {expected}, got {found}")]
    TupleLength {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("Missing required field \"{field}\" in class \"{class}\"")]
    MissingField { field: String, class: String },
    #[error("Missing value for required field \"{field}\" in constructor of class \"{class}\"")]
    MissingConstructorValue { field: String, class: String },
    #[error("Missing required field \"{field}\" at {path}{}", expected_by(.class.as_deref()))]
    MissingNestedField {
        field: String,
        path: String,
        class: Option<String>,
    },
    #[error("Unknown fields in class \"{class}\": {}", .fields.join(", "))]
    UnknownFields { class: String, fields: Vec<String> },
    #[error("Unknown fields at {path}: {}{}", .fields.join(", "), not_in_class(.class.as_deref()))]
    UnknownNestedFields {
        path: String,
        fields: Vec<String>,
        class: Option<String>,
    },
    #[error("Unknown type: {name}")]
    UnknownType { name: String },
    #[error("Type mismatch at {path}: expected literal \"{expected}\", got {found}")]
    LiteralMismatch {
        path: String,
        expected: String,
        found: String,
    },

    // Files and imports
    #[error("cannot read \"{}\": {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error("import cycle: {}", DisplayChain(.chain))]
    ImportCycle { chain: Vec<PathBuf> },
    #[error("in imported file \"{}\": {source}", .path.display())]
    ImportFailed { path: PathBuf, source: Box<Error> },
    #[error("cannot decode \"{}\": {source}", .path.display())]
    Decode { path: PathBuf, source: DecodeError },
}

fn expected_by(class: Option<&str>) -> String {
    class.map_or_else(String::new, |c| format!(" (expected by class {c})"))
}

fn not_in_class(class: Option<&str>) -> String {
    class.map_or_else(String::new, |c| format!(" (not defined in class {c})"))
}

struct DisplayChain<'a>(&'a [PathBuf]);

impl fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } => ErrorCode::E2001,
            Self::UnknownClass { .. } => ErrorCode::E2002,
            Self::UnknownBaseClass { .. } => ErrorCode::E2003,
            Self::UnknownMixin { .. } => ErrorCode::E2004,
            Self::ValidatorWithArguments { .. } => ErrorCode::E2005,
            Self::ConstructorWithoutArguments { .. } => ErrorCode::E2006,
            Self::SpreadIntoArray { .. }
            | Self::SpreadIntoObject { .. }
            | Self::SpreadArgument { .. } => ErrorCode::E2007,
            Self::TypeMismatch { .. } => ErrorCode::E3001,
            Self::TupleLength { .. } => ErrorCode::E3002,
            Self::MissingField { .. }
            | Self::MissingConstructorValue { .. }
            | Self::MissingNestedField { .. } => ErrorCode::E3003,
            Self::UnknownFields { .. } | Self::UnknownNestedFields { .. } => ErrorCode::E3004,
            Self::UnknownType { .. } => ErrorCode::E3005,
            Self::LiteralMismatch { .. } => ErrorCode::E3006,
            Self::Io { .. } => ErrorCode::E4001,
            Self::ImportCycle { .. } => ErrorCode::E4002,
            Self::ImportFailed { .. } => ErrorCode::E4003,
            Self::Decode { .. } => ErrorCode::E4004,
        }
    }
}

impl EvalError {
    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            location: None,
            notes: Vec::new(),
        }
    }

    /// Attach `span` unless a more precise one is already recorded.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

impl IntoDiagnostic for EvalError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        diag.location = self.location;
        if let EvalErrorKind::ImportFailed { source, .. } = &self.kind {
            let inner = source.to_diagnostic();
            if let Some(Location { line, column }) = inner.location {
                diag = diag.with_note(format!("imported file failed at {line}:{column}"));
            }
        }
        self.notes
            .iter()
            .fold(diag, |diag, note| diag.with_note(note.clone()))
    }
}

// Reference and usage

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn unknown_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownClass {
        name: name.to_owned(),
    })
}

#[cold]
pub fn unknown_base_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownBaseClass {
        name: name.to_owned(),
    })
}

#[cold]
pub fn unknown_mixin(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownMixin {
        name: name.to_owned(),
    })
}

#[cold]
pub fn validator_with_arguments(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ValidatorWithArguments {
        class: class.to_owned(),
    })
}

#[cold]
pub fn constructor_without_arguments(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstructorWithoutArguments {
        class: class.to_owned(),
    })
}

#[cold]
pub fn spread_into_array(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SpreadIntoArray { found })
}

#[cold]
pub fn spread_into_object(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SpreadIntoObject { found })
}

#[cold]
pub fn spread_argument(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SpreadArgument { found })
}

// Type validation

#[cold]
pub fn type_mismatch(path: &str, expected: impl Into<String>, found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        path: path.to_owned(),
        expected: expected.into(),
        found,
    })
}

#[cold]
pub fn tuple_length(path: &str, expected: usize, found: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TupleLength {
        path: path.to_owned(),
        expected,
        found,
    })
}

#[cold]
pub fn missing_field(field: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingField {
        field: field.to_owned(),
        class: class.to_owned(),
    })
}

#[cold]
pub fn missing_constructor_value(field: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingConstructorValue {
        field: field.to_owned(),
        class: class.to_owned(),
    })
}

#[cold]
pub fn missing_nested_field(field: &str, path: &str, class: Option<&str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingNestedField {
        field: field.to_owned(),
        path: path.to_owned(),
        class: class.map(str::to_owned),
    })
}

#[cold]
pub fn unknown_fields(class: &str, fields: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFields {
        class: class.to_owned(),
        fields,
    })
}

#[cold]
pub fn unknown_nested_fields(path: &str, fields: Vec<String>, class: Option<&str>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownNestedFields {
        path: path.to_owned(),
        fields,
        class: class.map(str::to_owned),
    })
}

#[cold]
pub fn unknown_type(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownType {
        name: name.to_owned(),
    })
}

#[cold]
pub fn literal_mismatch(path: &str, expected: &str, found: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LiteralMismatch {
        path: path.to_owned(),
        expected: expected.to_owned(),
        found,
    })
}

// Files and imports

#[cold]
pub fn io_error(path: &Path, err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        path: path.to_owned(),
        message: err.to_string(),
    })
}

#[cold]
pub fn import_cycle(chain: Vec<PathBuf>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportCycle { chain })
}

#[cold]
pub fn import_failed(path: &Path, source: Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportFailed {
        path: path.to_owned(),
        source: Box::new(source),
    })
}

#[cold]
pub fn decode_error(path: &Path, source: DecodeError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Decode {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_messages_name_the_class_when_known() {
        assert_eq!(
            missing_nested_field("x", "C.inner", Some("Inner")).to_string(),
            "Missing required field \"x\" at C.inner (expected by class Inner)"
        );
        assert_eq!(
            missing_nested_field("x", "C.inner", None).to_string(),
            "Missing required field \"x\" at C.inner"
        );
        assert_eq!(
            unknown_nested_fields("C.o", vec!["a".into(), "b".into()], Some("O")).to_string(),
            "Unknown fields at C.o: a, b (not defined in class O)"
        );
    }

    #[test]
    fn cycle_lists_the_chain() {
        let err = import_cycle(vec!["/a.bcon".into(), "/b.bcon".into(), "/a.bcon".into()]);
        assert_eq!(err.to_string(), "import cycle: /a.bcon -> /b.bcon -> /a.bcon");
        assert_eq!(err.code(), ErrorCode::E4002);
    }

    #[test]
    fn innermost_span_wins() {
        let err = undefined_variable("x")
            .with_span(Span::new(4, 5))
            .with_span(Span::new(0, 10));
        assert_eq!(err.span, Some(Span::new(4, 5)));
    }

    #[test]
    fn diagnostic_carries_code_location_and_notes() {
        let mut err = unknown_class("Point").with_note("while evaluating the export");
        err.location = Some(Location { line: 3, column: 8 });
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2002);
        assert_eq!(diag.message, "Class \"Point\" not found");
        assert_eq!(diag.location, Some(Location { line: 3, column: 8 }));
        assert_eq!(diag.notes, vec!["while evaluating the export".to_owned()]);
    }
}
