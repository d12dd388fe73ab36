//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check the bind address and log level are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppSettings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppSettings;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),
    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,
    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
    #[error("security.max_body_size must be greater than 0")]
    ZeroBodyLimit,
}

/// Check every semantic rule, returning all failures.
pub fn validate_settings(settings: &AppSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            settings.listener.bind_address.clone(),
        ));
    }

    if settings.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let level = settings.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            settings.observability.log_level.clone(),
        ));
    }

    if settings.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
