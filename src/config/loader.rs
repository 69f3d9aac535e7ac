//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AppConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment override {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration: file (or defaults), then
/// environment overrides, then semantic validation of the result.
pub fn resolve_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides: `PORT`, `STORE_URI`, `LOG_LEVEL`,
/// `LOG_FORMAT`. Unset variables leave the config untouched.
pub fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port.parse().map_err(|e| ConfigError::Env {
            name: "PORT",
            reason: format!("{e} (got {port:?})"),
        })?;
    }
    if let Ok(uri) = std::env::var("STORE_URI") {
        config.store.uri = uri;
    }
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        config.observability.log_format = match format.as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Env {
                    name: "LOG_FORMAT",
                    reason: format!("expected \"pretty\" or \"json\", got {other:?}"),
                })
            }
        };
    }
    Ok(())
}
