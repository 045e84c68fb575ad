//! Error types for DSDL operations.
//!
//! This module provides the main error type [`DsdlError`] which wraps
//! the error conditions that can occur while compiling a schema.

use std::{error::Error, io};

use thiserror::Error;

use dsdl_parser::error::{DiagnosticError, ErrorKind};

/// The main error type for DSDL operations.
///
/// # Diagnostic Variants
///
/// The `Parse` and `Graph` variants contain structured diagnostics. `Parse`
/// also keeps the schema document so that labels can be rendered against it.
#[derive(Debug, Error)]
pub enum DsdlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: DiagnosticError, src: String },

    #[error("{0}")]
    Graph(DiagnosticError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(Box<dyn Error + Send + Sync>),
}

impl DsdlError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: DiagnosticError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// The kind of schema error, if this error came from a diagnostic.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Parse { err, .. } | Self::Graph(err) => err.kind(),
            Self::Io(_) | Self::Config(_) | Self::Output(_) => None,
        }
    }
}

impl From<std::fmt::Error> for DsdlError {
    fn from(error: std::fmt::Error) -> Self {
        Self::Output(Box::new(error))
    }
}
