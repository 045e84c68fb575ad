//! DSDL - A schema compiler for dataset description documents.
//!
//! Reads a YAML schema of struct and class-domain definitions, validates the
//! field type grammar, orders the definitions by their dependencies, and
//! generates Python type declarations for the structured-type runtime.

pub mod codegen;
pub mod config;
pub mod graph;

mod error;

pub use dsdl_core::{field_type, identifier, schema};
pub use dsdl_parser::error::ErrorKind;

pub use error::DsdlError;

use std::{fs, io::Write, path::Path};

use log::{debug, info, trace};
use tempfile::NamedTempFile;

use dsdl_core::{identifier::Id, schema::Schema};
use dsdl_parser::LoadConfig;

use codegen::{Emitter, PythonEmitter};
use config::AppConfig;
use graph::DependencyGraph;

/// Compiler for DSDL schema documents.
///
/// Compilation runs in three stages: parsing the document into a [`Schema`],
/// ordering its definitions, and generating code.
///
/// # Examples
///
/// ```rust
/// use dsdl::{SchemaCompiler, config::AppConfig};
///
/// let source = r#"
/// defs:
///   Animals:
///     $def: class_domain
///     classes: [dog, cat]
///   Sample:
///     $def: struct
///     $fields:
///       label: Label[dom=Animals]
///       count: Int
/// "#;
///
/// let compiler = SchemaCompiler::new(AppConfig::default());
/// let schema = compiler.parse(source).expect("Failed to parse");
/// let code = compiler.generate(&schema).expect("Failed to generate");
///
/// assert!(code.contains("class Animals(Enum):"));
/// assert!(code.contains("    count = IntField()"));
/// ```
#[derive(Default)]
pub struct SchemaCompiler {
    config: AppConfig,
}

impl SchemaCompiler {
    /// Create a new schema compiler with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including compiler and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a schema document into a [`Schema`].
    ///
    /// This reads the YAML, loads every definition, and parses each struct
    /// field's type expression.
    ///
    /// # Errors
    ///
    /// Returns `DsdlError::Parse` for malformed documents, duplicate
    /// definitions, unknown types, and grammar errors.
    pub fn parse(&self, source: &str) -> Result<Schema, DsdlError> {
        info!("Parsing schema");

        let load_config = LoadConfig::new(self.config.compiler().strict_identifiers());
        let schema = dsdl_parser::parse(source, load_config)
            .map_err(|err| DsdlError::new_parse_error(err, source))?;

        debug!(definitions = schema.len(); "Schema parsed successfully");
        trace!(schema:?; "Parsed schema");

        Ok(schema)
    }

    /// Order the definitions of `schema` so that dependencies come first.
    ///
    /// # Errors
    ///
    /// Returns `DsdlError::Graph` if the definitions depend on each other in
    /// a cycle.
    pub fn emission_order(&self, schema: &Schema) -> Result<Vec<Id>, DsdlError> {
        info!(definitions = schema.len(); "Building dependency graph");
        let graph = DependencyGraph::build(schema);

        graph.emission_order().map_err(DsdlError::Graph)
    }

    /// Generate Python declarations for `schema`.
    ///
    /// # Errors
    ///
    /// Returns `DsdlError::Graph` for circular definitions and
    /// `DsdlError::Output` if rendering fails.
    pub fn generate(&self, schema: &Schema) -> Result<String, DsdlError> {
        let order = self.emission_order(schema)?;

        info!(declarations = order.len(); "Generating code");
        let module = codegen::lower(schema, &order);
        trace!(module:?; "Lowered module");

        let emitter = PythonEmitter::new(self.config.output());
        let code = emitter.emit(&module)?;

        debug!(bytes = code.len(); "Code generated successfully");
        Ok(code)
    }

    /// Parse `source` and generate code for it.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`parse`](Self::parse) or
    /// [`generate`](Self::generate).
    pub fn compile_source(&self, source: &str) -> Result<String, DsdlError> {
        let schema = self.parse(source)?;
        self.generate(&schema)
    }

    /// Compile the schema at `input` and write the generated code to `output`.
    ///
    /// The code is written to a temporary file next to `output` which
    /// replaces `output` only once everything succeeded, so a failed
    /// compilation never leaves partial output behind.
    ///
    /// # Errors
    ///
    /// Returns `DsdlError::Io` if the input cannot be read or the output
    /// cannot be written, and any compilation error otherwise.
    pub fn compile(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), DsdlError> {
        let input = input.as_ref();
        let output = output.as_ref();
        info!(input:? = input; "Reading schema file");

        let source = fs::read_to_string(input)?;
        let code = self.compile_source(&source)?;

        let parent = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(code.as_bytes())?;
        file.persist(output).map_err(|err| DsdlError::Io(err.error))?;

        info!(output:? = output; "Generated code written");
        Ok(())
    }
}

/// Compile the schema at `input` to `output` with the default configuration.
///
/// # Errors
///
/// See [`SchemaCompiler::compile`].
///
/// # Examples
///
/// ```rust,no_run
/// dsdl::compile("schema.yaml", "schema.py").expect("Failed to compile");
/// ```
pub fn compile(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), DsdlError> {
    SchemaCompiler::default().compile(input, output)
}
