//! # Relic
//!
//! A type-safe registry for item abilities.
//!
//! ## Overview
//!
//! Items carry *powers* (abilities fired by game events) gated by
//! *conditions*. Extensions contribute power and condition types; Relic
//! registers them under namespaced keys, scans their declared properties,
//! and resolves the capabilities a live power exposes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌───────────────────────────┐
//! │   Runtime   │────▶│ RegistryBuilder │────▶│ Registry (frozen, shared) │
//! │  (config)   │     │  (load phase)   │     │ keys, properties, meta,   │
//! └─────────────┘     └─────────────────┘     │ adapters, overrides       │
//!        ▲                                    └───────────────────────────┘
//!        │ EXTENSIONS (linkme)
//! ┌──────┴──────────────┐
//! │ relic, myext, ...   │  power / condition descriptors + setup hooks
//! └─────────────────────┘
//! ```
//!
//! - **Core**: keys, descriptors, capabilities and the engine surface
//! - **Registry**: registration, queries, adapters, overrides, descriptions
//! - **Runtime**: configuration, logging and startup
//! - **Powers**: the built-in `relic` extension
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relic::prelude::*;
//!
//! let runtime = RelicRuntime::new()?;
//! let registry = runtime.registry();
//!
//! let key = registry.parse_key("potiontick")?;
//! let power = registry.create_power(&key, &section)?;
//! let pimpl = registry.create_impl(registry.get_power(&key).unwrap(), power.into())?;
//! let right_click = registry.adapt::<dyn PowerRightClick>(&pimpl);
//! ```
//!
//! ## Features
//!
//! - `builtin-powers`: Link the built-in `relic` extension (default)
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use relic_core as core;
#[cfg(feature = "builtin-powers")]
pub use relic_powers as powers;
pub use relic_registry as registry;
pub use relic_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use relic::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use relic_runtime::{RelicConfig, RelicRuntime};

    // Registry - queries and the load phase
    pub use relic_registry::{
        EXTENSIONS, ExtensionDescriptor, RegistrationReport, Registry, RegistryBuilder,
        RegistryError, RegistryResult,
    };

    // Declaring powers, conditions and their capabilities
    pub use relic_core::prelude::*;

    #[cfg(feature = "builtin-powers")]
    pub use relic_powers::{BASE_POWER, BasePower, POTION_TICK, STUCK};
}
