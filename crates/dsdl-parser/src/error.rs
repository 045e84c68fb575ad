//! Error and diagnostic system for the DSDL parser.
//!
//! This module provides:
//! - Error codes grouped by compilation phase
//! - A mapping from codes to the error kinds callers branch on
//! - Labeled spans for pointing into field type expressions
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with an optional error code, source
//! locations, and help text. One or more diagnostics are wrapped in
//! [`DiagnosticError`] when a phase fails.
//!
//! # Example
//!
//! ```
//! # use dsdl_parser::error::{Diagnostic, ErrorCode, ErrorKind};
//! # use dsdl_parser::Span;
//!
//! let diag = Diagnostic::error("unknown type `Float`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(0..5), "not a field type")
//!     .with_source_text("Float");
//!
//! assert_eq!(diag.kind(), Some(ErrorKind::UnknownType));
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::DiagnosticError;
