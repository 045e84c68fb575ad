//! Command-line argument definitions for the DSDL CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the DSDL schema compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input schema file (YAML)
    #[arg(help = "Path to the input schema file")]
    pub input: String,

    /// Path to the generated Python file; defaults to the input path with a
    /// `.py` extension
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The path generated code is written to.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => PathBuf::from(&self.input).with_extension("py"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str, output: Option<&str>) -> Args {
        Args {
            input: input.to_string(),
            output: output.map(str::to_string),
            config: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_output_defaults_to_input_with_py_extension() {
        assert_eq!(
            args("schemas/animals.yaml", None).output_path(),
            PathBuf::from("schemas/animals.py")
        );
        assert_eq!(args("animals", None).output_path(), PathBuf::from("animals.py"));
    }

    #[test]
    fn test_explicit_output() {
        assert_eq!(
            args("animals.yaml", Some("out/types.py")).output_path(),
            PathBuf::from("out/types.py")
        );
    }

    #[test]
    fn test_parse_command_line() {
        let args = Args::parse_from(["dsdl", "animals.yaml", "-o", "gen.py", "--log-level", "debug"]);

        assert_eq!(args.input, "animals.yaml");
        assert_eq!(args.output.as_deref(), Some("gen.py"));
        assert_eq!(args.log_level, "debug");
        assert!(args.config.is_none());
    }
}
