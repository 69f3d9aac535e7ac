//! Configuration validation.
//!
//! Semantic checks on an already-deserialized config; serde handles the
//! syntactic ones. Returns every violation, not just the first.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.port must not be 0")]
    ZeroPort,

    #[error("server.request_timeout_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("store.uri must not be empty")]
    EmptyStoreUri,

    #[error("observability.log_level {0:?} is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.store.uri.trim().is_empty() {
        errors.push(ValidationError::EmptyStoreUri);
    }
    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
