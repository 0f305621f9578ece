use std::fmt;

/// Error codes for lexer and parser diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E0xxx: lexer
/// - E1xxx: parser
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Block comment not closed before end of file
    E0001,
    /// Character that starts no token
    E0002,
    /// Character literal not closed on its line
    E0003,
    /// Backticked identifier not closed on its line
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected or misplaced token
    E1001,
    /// Expected an expression or element
    E1002,
    /// Unclosed delimiter or missing closing token
    E1003,
    /// Expected a name
    E1004,
    /// Expected a type
    E1005,
    /// Construct parsed but not allowed in this position
    E1006,
    /// String template not terminated
    E1007,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
