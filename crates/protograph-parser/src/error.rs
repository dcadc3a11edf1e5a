//! Error and diagnostic system for the protograph parser.
//!
//! Every malformed-input condition is reported as a [`FormatError`], which
//! wraps one or more [`Diagnostic`]s. A diagnostic carries an [`ErrorCode`],
//! a message naming the offending value, labeled source spans and optional
//! help text.
//!
//! # Example
//!
//! ```
//! # use protograph_parser::error::{Diagnostic, ErrorCode};
//! # use protograph_parser::Span;
//!
//! let row = Span::new(120..135);
//! let header = Span::new(80..98);
//!
//! let diag = Diagnostic::error("table row has 1 cell but the header has 2 columns")
//!     .with_code(ErrorCode::E100)
//!     .with_label(row, "row defined here")
//!     .with_secondary_label(header, "header defined here")
//!     .with_help("add or remove cells so every row matches the header");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod format_error;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use format_error::FormatError;
pub use label::Label;
pub use severity::Severity;
