//! Runtime error types.

use relic_registry::RegistryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while starting the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An extension's setup hook failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Strict mode is on and some types failed to register.
    #[error("{count} type(s) failed to register: {}", .failed.join(", "))]
    RegistrationFailed { count: usize, failed: Vec<String> },
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
