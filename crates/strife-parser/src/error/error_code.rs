//! Error codes for the Strife diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Tokenizer errors
//! - `E1xx` - Declaration errors
//! - `E2xx` - File inclusion errors
//! - `E3xx` - Run control

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Tokenizer Errors (E0xx)
    // =========================================================================
    /// Unexpected end of input.
    ///
    /// The file ended in the middle of a declaration.
    E001,

    // =========================================================================
    // Declaration Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// A declaration was recognised but a later token does not fit it.
    E100,

    /// Duplicate modifier.
    ///
    /// A script declares `clientside` twice or more than one activator.
    E101,

    /// Unknown symbol.
    ///
    /// No declaration form matches the input at this position.
    E102,

    /// Unterminated body.
    ///
    /// A function or script body is missing its closing brace.
    E103,

    /// Unbalanced namespace close.
    ///
    /// A `}` was found at top level with no namespace open.
    E104,

    /// Unknown documentation tag.
    ///
    /// A `/** */` comment uses an `@tag` that is not recognised.
    E105,

    // =========================================================================
    // Inclusion Errors (E2xx)
    // =========================================================================
    /// Included file not found.
    E200,

    /// File included more than once.
    ///
    /// Every file may be parsed at most once per run.
    E201,

    /// File could not be read.
    E202,

    // =========================================================================
    // Run Control (E3xx)
    // =========================================================================
    /// Parse cancelled.
    ///
    /// The cancellation token was set while the run was in progress.
    E300,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected end of input",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "duplicate modifier",
            ErrorCode::E102 => "unknown symbol",
            ErrorCode::E103 => "unterminated body",
            ErrorCode::E104 => "unbalanced namespace close",
            ErrorCode::E105 => "unknown documentation tag",
            ErrorCode::E200 => "included file not found",
            ErrorCode::E201 => "file included more than once",
            ErrorCode::E202 => "file could not be read",
            ErrorCode::E300 => "parse cancelled",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E103.description(), "unterminated body");
        assert_eq!(ErrorCode::E300.description(), "parse cancelled");
    }
}
