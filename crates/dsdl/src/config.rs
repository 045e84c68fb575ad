//! Configuration types for DSDL schema compilation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! configuration file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining compiler and output settings.
//! - [`CompilerConfig`] - Controls how schema documents are loaded.
//! - [`OutputConfig`] - Controls the layout of generated code.
//!
//! # Example
//!
//! ```
//! # use dsdl::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.output().indent_width(), 4);
//! assert!(!config.compiler().strict_identifiers());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Compiler configuration section.
    #[serde(default)]
    compiler: CompilerConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `compiler` - Schema loading settings.
    /// * `output` - Generated code layout.
    pub fn new(compiler: CompilerConfig, output: OutputConfig) -> Self {
        Self { compiler, output }
    }

    /// Returns the compiler configuration.
    pub fn compiler(&self) -> &CompilerConfig {
        &self.compiler
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Schema loading configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CompilerConfig {
    /// Reject definition, field, and class names that are not identifiers
    /// instead of skipping them.
    #[serde(default)]
    strict_identifiers: bool,
}

impl CompilerConfig {
    pub fn new(strict_identifiers: bool) -> Self {
        Self { strict_identifiers }
    }

    /// Returns whether non-identifier names are rejected.
    pub fn strict_identifiers(&self) -> bool {
        self.strict_identifiers
    }
}

/// Layout of the generated code.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Spaces per indentation level.
    #[serde(default = "default_indent_width")]
    indent_width: usize,

    /// Blank lines between two declarations.
    #[serde(default = "default_blank_lines")]
    blank_lines: usize,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    ///
    /// # Arguments
    ///
    /// * `indent_width` - Spaces per indentation level.
    /// * `blank_lines` - Blank lines between two declarations.
    pub fn new(indent_width: usize, blank_lines: usize) -> Self {
        Self {
            indent_width,
            blank_lines,
        }
    }

    /// Returns the number of spaces per indentation level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Returns the number of blank lines between declarations.
    pub fn blank_lines(&self) -> usize {
        self.blank_lines
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            blank_lines: default_blank_lines(),
        }
    }
}

fn default_indent_width() -> usize {
    4
}

fn default_blank_lines() -> usize {
    1
}
