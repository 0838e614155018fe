use std::fmt;

/// Error codes for every BCON failure.
///
/// The first digit names the stage:
/// - E0xxx: lexical
/// - E1xxx: syntax
/// - E2xxx: reference and usage
/// - E3xxx: type validation
/// - E4xxx: file access and imports
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E0xxx)
    /// Character not covered by any token
    E0001,

    // Syntax (E1xxx)
    /// Unexpected token
    E1001,
    /// Unexpected end of input
    E1002,
    /// Record and sequence keys mixed in one literal
    E1003,
    /// Malformed number or bigint literal
    E1004,
    /// Malformed date literal
    E1005,
    /// Malformed regular expression
    E1006,
    /// Unknown encoding name
    E1007,
    /// File literal target does not exist
    E1008,
    /// File literal target is not a file
    E1009,
    /// Misplaced or repeated spread parameter
    E1010,
    /// Destructuring binding used with `as`
    E1011,
    /// Module has no `export`
    E1012,
    /// Tokens after the `export` statement
    E1013,

    // Reference and usage (E2xxx)
    /// Undefined variable
    E2001,
    /// Unknown class
    E2002,
    /// Unknown base class
    E2003,
    /// Unknown mixin
    E2004,
    /// Arguments supplied to a validator class
    E2005,
    /// Literal supplied to a constructor class
    E2006,
    /// Spread target of the wrong kind
    E2007,

    // Type validation (E3xxx)
    /// Type mismatch
    E3001,
    /// Tuple length mismatch
    E3002,
    /// Missing required field
    E3003,
    /// Unknown fields
    E3004,
    /// Unknown type name
    E3005,
    /// Literal type mismatch
    E3006,

    // Files and imports (E4xxx)
    /// File could not be read
    E4001,
    /// Import cycle
    E4002,
    /// Imported file failed
    E4003,
    /// File contents not valid in the declared encoding
    E4004,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E0") || self.as_str().starts_with("E1")
    }

    pub fn is_type_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
