//! Relic Registry - type, capability and description registry.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────── load phase ────────────────────────────┐
//! │ ExtensionDescriptor ──► RegistryBuilder                            │
//! │                           ├─ register_powers / register_conditions │
//! │                           │    └─ scan() → PropertyTable           │
//! │                           ├─ register_adapter                      │
//! │                           ├─ register_override                     │
//! │                           └─ add_description_resolver              │
//! └──────────────────────────────┬─────────────────────────────────────┘
//!                                │ build()
//! ┌──────────────────────────────▼──────────── query phase ────────────┐
//! │ Arc<Registry>: get_power, properties, meta, triggers,              │
//! │                accepted_values, description, parse_key, adapt      │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The builder is the only mutable handle. [`RegistryBuilder::build`]
//! consumes it, so a [`Registry`] can be shared across threads without
//! locking.

pub mod adapter;
pub mod builder;
pub mod description;
pub mod error;
pub mod extension;
pub mod overrides;
pub mod preset;
pub mod registry;
pub mod report;
pub mod scan;

pub use adapter::AdapterTable;
pub use builder::{DEFAULT_LOCALE, RegistryBuilder};
pub use description::{DescriptionResolver, DescriptionTable};
pub use error::{
    RegistrationError, RegistrationResult, RegistryError, RegistryResult, ScanError,
};
pub use extension::{EXTENSIONS, ExtensionDescriptor, SetupFn, collect_extensions};
pub use overrides::OverrideTable;
pub use registry::{Registry, TypeTable};
pub use report::RegistrationReport;
pub use scan::{PropertyEntry, PropertyTable, scan};

// Re-exported for `#[linkme(crate = relic_registry::linkme)]`.
pub use linkme;
