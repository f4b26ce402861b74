//! Configuration module for the Relic runtime.
//!
//! Configuration is layered with figment (defaults, files, `RELIC_*`
//! environment variables, programmatic overrides) and validated before the
//! registry is built.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LogLevel, LogOutput, LoggingConfig, RegistryConfig, RelicConfig};
pub use validation::validate_config;
