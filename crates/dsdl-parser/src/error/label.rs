//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the text a diagnostic refers to.
///
/// - **Primary labels** mark the main location of an error.
/// - **Secondary labels** add context, such as "`etype` expected here".
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Returns `true` for a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }

    pub(crate) fn shift(mut self, offset: usize) -> Self {
        self.span = self.span.shift(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_secondary() {
        let primary = Label::primary(Span::new(0..4), "here");
        let secondary = Label::secondary(Span::new(5..9), "context");

        assert!(primary.is_primary());
        assert!(secondary.is_secondary());
        assert_eq!(primary.message(), "here");
    }

    #[test]
    fn test_shift() {
        let label = Label::primary(Span::new(0..3), "x").shift(10);
        assert_eq!(label.span(), Span::new(10..13));
    }
}
