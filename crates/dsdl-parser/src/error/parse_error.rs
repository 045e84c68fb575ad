//! The DiagnosticError type for wrapping diagnostics.
//!
//! [`DiagnosticError`] wraps one or more [`Diagnostic`]s produced by a failed
//! phase (grammar, loading, or dependency ordering).

use std::fmt;

use crate::error::{Diagnostic, ErrorKind};

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error type carrying the diagnostics of a failed phase.
#[derive(Debug)]
pub struct DiagnosticError {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticError {
    /// Create a new error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The error kind of the first diagnostic that carries a code.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.diagnostics.iter().find_map(Diagnostic::kind)
    }
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticError {}

impl From<Diagnostic> for DiagnosticError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for DiagnosticError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E201);
        let err: DiagnosticError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "test error");
        assert_eq!(err.kind(), Some(ErrorKind::DuplicateDefinition));
    }

    #[test]
    fn test_display_single() {
        let err: DiagnosticError = Diagnostic::error("unknown type `Float`").into();

        assert_eq!(err.to_string(), "error: unknown type `Float`");
    }

    #[test]
    fn test_display_multiple() {
        let diags = vec![
            Diagnostic::error("first cycle"),
            Diagnostic::error("second cycle"),
        ];
        let err: DiagnosticError = diags.into();

        assert_eq!(err.to_string(), "error: first cycle (+1 more)");
        assert_eq!(err.kind(), None);
    }
}
