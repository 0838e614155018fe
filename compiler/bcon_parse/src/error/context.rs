//! Error context for "while parsing X" notes.

/// What the parser was working on when an error occurred.
///
/// Attached by [`Parser::in_error_context`](crate::Parser) and rendered as a
/// diagnostic note. The innermost context wins.
///
/// ```ignore
/// self.in_error_context(ErrorContext::ClassDecl, Self::parse_class_inner)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    // === Statements ===
    /// An `import` statement.
    Import,
    /// A `use` statement.
    Use,
    /// A destructuring pattern.
    Destructuring,
    /// A class declaration.
    ClassDecl,
    /// Constructor parameters of a class.
    ClassParams,
    /// A field inside a class body.
    ClassField,
    /// The `export` statement.
    Export,

    // === Values ===
    /// A bracketed record or sequence literal.
    Container,
    /// Constructor call arguments.
    Arguments,

    // === Types ===
    /// A field type annotation.
    TypeAnnotation,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Import => "an import statement",
            Self::Use => "a use statement",
            Self::Destructuring => "a destructuring pattern",
            Self::ClassDecl => "a class declaration",
            Self::ClassParams => "constructor parameters",
            Self::ClassField => "a class field",
            Self::Export => "the export statement",
            Self::Container => "a record or sequence literal",
            Self::Arguments => "constructor arguments",
            Self::TypeAnnotation => "a type annotation",
        }
    }
}
