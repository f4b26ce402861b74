//! Error types shared by every Relic crate.
//!
//! Registry-level errors (scanning, registration, overrides) live in
//! `relic-registry`; this module only holds what the core types themselves
//! can fail with.

use thiserror::Error;

/// Boxed error returned by extension-supplied factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Key Errors
// =============================================================================

/// Errors produced while building or parsing a [`NamespacedKey`](crate::NamespacedKey).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The input does not have the `namespace:name` shape, or one of its
    /// parts contains characters outside the allowed set.
    #[error("malformed key '{input}': {reason}")]
    MalformedKey {
        /// The offending input.
        input: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The namespace does not belong to any registered extension.
    #[error("unknown extension '{0}'")]
    UnknownExtension(String),
}

impl KeyError {
    /// Creates a malformed-key error.
    pub fn malformed(input: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedKey {
            input: input.into(),
            reason,
        }
    }
}

/// Result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;

// =============================================================================
// Section Errors
// =============================================================================

/// Errors raised while reading a configuration section into a power or condition.
#[derive(Debug, Error)]
pub enum SectionError {
    /// A value exists but cannot be converted to the expected type.
    #[error("invalid value for '{key}': {source}")]
    InvalidValue {
        /// The section key.
        key: String,
        /// The conversion failure.
        #[source]
        source: serde_json::Error,
    },

    /// A mandatory entry is absent.
    #[error("missing required entry '{0}'")]
    Missing(String),
}

/// Result type for configuration-section operations.
pub type SectionResult<T> = Result<T, SectionError>;
