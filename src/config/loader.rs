//! Settings loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AppSettings;
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(content: &str) -> Result<AppSettings, ConfigError> {
    let settings: AppSettings = toml::from_str(content)?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;
    Ok(settings)
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<AppSettings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Load settings from `path` when given, otherwise use validated defaults.
pub fn load_optional(path: Option<&Path>) -> Result<AppSettings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => {
            let settings = AppSettings::default();
            validate_settings(&settings).map_err(ConfigError::Validation)?;
            Ok(settings)
        }
    }
}
