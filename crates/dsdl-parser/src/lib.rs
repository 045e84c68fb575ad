//! # DSDL Parser
//!
//! Field type grammar and schema loader for DSDL dataset schemas. This crate
//! turns a YAML schema document into a [`Schema`].
//!
//! ## Usage
//!
//! ```
//! # use dsdl_parser::{parse, LoadConfig, error::DiagnosticError};
//!
//! fn main() -> Result<(), DiagnosticError> {
//!     let source = r#"
//! defs:
//!   MyClassDom:
//!     $def: class_domain
//!     classes: [dog, cat]
//!   Sample:
//!     $def: struct
//!     $fields:
//!       label: Label[dom=MyClassDom]
//!       count: Int
//! "#;
//!
//!     let schema = parse(source, LoadConfig::default())?;
//!     assert_eq!(schema.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;

mod document;
mod field_type;
mod grammar;
#[cfg(test)]
mod grammar_tests;
mod loader;
mod span;

pub use field_type::{normalize, parse_field_type};
pub use loader::LoadConfig;
pub use span::{Span, Spanned};

use log::{debug, info};

use dsdl_core::schema::Schema;

use error::DiagnosticError;

/// Parse a YAML schema document into a [`Schema`].
///
/// The document is read, then every definition is loaded in document order:
///
/// 1. **Read** - Deserialize the YAML into raw entries
/// 2. **Load** - Check names and kinds, parse struct field types
///
/// # Arguments
///
/// * `source` - The schema document
/// * `config` - How non-identifier names are treated
///
/// # Errors
///
/// Returns a [`DiagnosticError`] with the first problem found.
pub fn parse(source: &str, config: LoadConfig) -> Result<Schema, DiagnosticError> {
    info!("Reading schema document");
    let document = document::from_yaml(source)?;

    let schema = loader::load(document, config)?;
    debug!(definitions = schema.len(); "Schema loaded");

    Ok(schema)
}
