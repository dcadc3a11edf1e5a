//! Collector for accumulating diagnostics during validation.
//!
//! The [`DiagnosticCollector`] lets the validator report every broken
//! reference in a document instead of stopping at the first one.

use crate::error::{Diagnostic, FormatError};

/// Accumulates errors and warnings in the order they are emitted.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic, sorting it by severity.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    /// Finish collection.
    ///
    /// - If any error was emitted, returns `Err(FormatError)` with the errors
    ///   in emission order.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, FormatError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(FormatError::new(self.errors))
        }
    }
}
