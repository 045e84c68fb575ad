//! The core diagnostic type for the DSDL error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, location within the schema, labeled spans, and help text.

use std::fmt;

use crate::{
    error::{ErrorKind, error_code::ErrorCode, label::Label},
    span::Span,
};

/// How serious a diagnostic is. Only errors abort a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message with source location information.
///
/// Schema documents are YAML, so positions inside them are described in two
/// ways:
/// - a *location* naming where in the schema the problem is
///   (e.g. ``field `label` of `Sample` ``)
/// - labels whose spans point into the *source text*, which is the field type
///   expression for grammar errors and the whole document otherwise
///
/// # Example
///
/// ```text
/// error[E105]: invalid value `yes` for `ordered` (in field `tags` of `Sample`)
///    |
///  1 | List[etype=Str,ordered=yes]
///    |                        ^^^ expected `true` or `false`
///    |
///    = help: `ordered` accepts `true` or `false` in any letter case
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    location: Option<String>,
    labels: Vec<Label>,
    help: Option<String>,
    source_text: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use dsdl_parser::error::{Diagnostic, ErrorCode};
    /// # use dsdl_parser::Span;
    ///
    /// let diag = Diagnostic::error("unknown type `Float`")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(Span::new(0..5), "not a field type")
    ///     .with_help("did you mean `Num`?");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the error kind derived from the code, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.code.map(|code| code.kind())
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the schema location, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Get the text the label spans point into, if it is not the document.
    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    /// The message followed by the schema location, if any.
    pub fn located_message(&self) -> String {
        match &self.location {
            Some(location) => format!("{} (in {location})", self.message),
            None => self.message.clone(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the schema location. An existing location is kept.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location.get_or_insert_with(|| location.into());
        self
    }

    /// Set the text the label spans point into. An existing text is kept.
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text.get_or_insert_with(|| text.into());
        self
    }

    /// Move every label `offset` bytes to the right.
    pub(crate) fn shift_labels(mut self, offset: usize) -> Self {
        self.labels = self
            .labels
            .into_iter()
            .map(|label| label.shift(offset))
            .collect();
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            location: None,
            labels: Vec::new(),
            help: None,
            source_text: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.located_message())
    }
}

impl std::error::Error for Diagnostic {}
