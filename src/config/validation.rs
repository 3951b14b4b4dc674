//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use ircserv_proto::is_valid_hostname;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must be a hostname-like token, got '{0}'")]
    InvalidServerName(String),
    #[error("limits.read_chunk must be positive")]
    ZeroReadChunk,
    #[error("limits.send_queue must be positive")]
    ZeroSendQueue,
    #[error("limits.max_pending_bytes must be positive when set")]
    ZeroPendingBound,
    #[error("log.filter is required")]
    MissingLogFilter,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name == "*" || !is_valid_hostname(name) {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    if config.limits.read_chunk == 0 {
        errors.push(ValidationError::ZeroReadChunk);
    }
    if config.limits.send_queue == 0 {
        errors.push(ValidationError::ZeroSendQueue);
    }
    if config.limits.max_pending_bytes == Some(0) {
        errors.push(ValidationError::ZeroPendingBound);
    }

    if config.log.filter.trim().is_empty() {
        errors.push(ValidationError::MissingLogFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
