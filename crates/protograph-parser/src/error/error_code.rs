//! Error codes for the protograph diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Front matter errors
//! - `E1xx` - Table and entity errors
//! - `E2xx` - Validation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Front Matter Errors (E0xx)
    // =========================================================================
    /// Missing opening delimiter.
    ///
    /// The document does not start with a `---` line.
    E001,

    /// Missing key/value separator.
    ///
    /// A front matter line that is neither blank nor a `#` comment has no `:`.
    E002,

    /// Unterminated front matter.
    ///
    /// The document ends before the closing `---` line.
    E003,

    /// Source is not UTF-8.
    ///
    /// The document bytes cannot be decoded as UTF-8 text.
    E004,

    // =========================================================================
    // Table Errors (E1xx)
    // =========================================================================
    /// Row arity mismatch.
    ///
    /// A data row has a different number of cells than the header row.
    E100,

    /// Invalid id range.
    ///
    /// An entity id uses range shorthand (`NODE1..3`) whose end is smaller
    /// than its start, whose bounds do not fit an integer, or which spans
    /// too many ids.
    E101,

    /// Missing required column.
    ///
    /// A section's table has data rows but lacks a column the section needs.
    E102,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Missing or invalid diagram identifier.
    ///
    /// The front matter has no `diagram` key, its value is empty, or the
    /// value cannot be used as an output file name.
    E200,

    /// Unknown state owner.
    ///
    /// A state's owner is neither a declared entity nor `ARM`.
    E201,

    /// Unknown source state.
    E202,

    /// Unknown destination state.
    E203,

    /// Unknown command.
    ///
    /// The first token of a transition message is not a declared command id.
    E204,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
