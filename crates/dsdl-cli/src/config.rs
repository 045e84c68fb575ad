//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use dsdl::{DsdlError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl From<ConfigError> for DsdlError {
    fn from(err: ConfigError) -> Self {
        DsdlError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (dsdl/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or is invalid
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DsdlError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("dsdl/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "dsdl", "dsdl") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - An output setting is out of range
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, DsdlError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.output().indent_width() == 0 {
        return Err(ConfigError::Validation(
            "output.indent_width must be at least 1".to_string(),
        ));
    }
    if config.output().blank_lines() == 0 {
        return Err(ConfigError::Validation(
            "output.blank_lines must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").expect("empty config");

        assert!(!config.compiler().strict_identifiers());
        assert_eq!(config.output().indent_width(), 4);
        assert_eq!(config.output().blank_lines(), 1);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config("[compiler]\nstrict_identifiers = true\n\n[output]\nblank_lines = 2\n")
            .expect("valid config");

        assert!(config.compiler().strict_identifiers());
        assert_eq!(config.output().indent_width(), 4);
        assert_eq!(config.output().blank_lines(), 2);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            parse_config("[output]\nindent_width = \"four\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            parse_config("[output]\nindent_width = 0\n"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_declarations_need_a_blank_line() {
        let err = parse_config("[output]\nblank_lines = 0\n").expect_err("no separator");

        assert_eq!(
            err.to_string(),
            "Invalid configuration: output.blank_lines must be at least 1"
        );
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let err = load_config(Some(dir.path().join("missing.toml"))).expect_err("missing file");

        assert!(matches!(err, DsdlError::Config(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nindent_width = 2\n").expect("Failed to write config");

        let config = load_config(Some(&path)).expect("valid config");

        assert_eq!(config.output().indent_width(), 2);
    }
}
