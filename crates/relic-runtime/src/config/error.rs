//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Not a `.toml` file, or a `.yaml`/`.yml` file with `yaml-config`.
    #[error("Unsupported or disabled configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The configuration sources could not be parsed or extracted.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    ValidationError { message: String },

    /// Missing required field.
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// The host namespace is not a valid key namespace.
    #[error("Invalid host namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// The locale is not of the form `ll` or `ll_CC`.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
