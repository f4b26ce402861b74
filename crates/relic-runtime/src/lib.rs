//! Relic Runtime - startup layer for the Relic item-ability framework.
//!
//! This crate provides:
//! - Layered configuration (`RelicConfig`, `ConfigLoader`)
//! - Load-phase logging (`logging::init_from_config`)
//! - `RelicRuntime`, which registers every linked extension and freezes the
//!   registry
//!
//! ```ignore
//! use relic_runtime::RelicRuntime;
//!
//! let runtime = RelicRuntime::new()?;
//! let registry = runtime.registry().clone();
//! let key = registry.parse_key("potiontick")?;
//! let power_type = registry.get_power(&key);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{ConfigError, ConfigLoader, ConfigResult, RegistryConfig, RelicConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{RelicRuntime, RuntimeBuilder};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
