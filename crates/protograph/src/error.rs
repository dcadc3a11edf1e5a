//! Error types for protograph operations.
//!
//! This module provides the main error type [`ProtographError`] which wraps
//! the error conditions that can occur while compiling a specification.

use std::io;

use thiserror::Error;

use protograph_parser::error::FormatError;

/// The main error type for protograph operations.
///
/// # Diagnostic Variants
///
/// The `Format` variant carries every diagnostic found in the specification
/// together with the source text, so callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum ProtographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Format { err: FormatError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl ProtographError {
    /// Create a new `Format` error with the associated source text.
    pub fn new_format_error(err: FormatError, src: impl Into<String>) -> Self {
        Self::Format {
            err,
            src: src.into(),
        }
    }

    /// Returns `true` if the specification itself was malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
