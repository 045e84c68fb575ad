//! CLI logic for the DSDL schema compiler.
//!
//! This module contains the core CLI logic for the `dsdl` binary.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use dsdl::{DsdlError, SchemaCompiler};

/// Run the DSDL CLI application
///
/// This function compiles the input schema and writes the generated Python
/// declarations to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DsdlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Schema parsing errors
/// - Circular definitions
pub fn run(args: &Args) -> Result<(), DsdlError> {
    let output = args.output_path();
    info!(
        input_path = args.input,
        output_path = output.display().to_string();
        "Compiling schema"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let compiler = SchemaCompiler::new(app_config);
    compiler.compile(&args.input, &output)?;

    info!(output_file = output.display().to_string(); "Python declarations generated successfully");

    Ok(())
}
