//! Statically linked extensions.
//!
//! Each crate that contributes types declares one [`ExtensionDescriptor`] in
//! the [`EXTENSIONS`] distributed slice. The runtime collects every linked
//! descriptor and hands it to [`RegistryBuilder::register_extension`].
//!
//! ```rust,ignore
//! use relic_registry::{EXTENSIONS, ExtensionDescriptor, linkme};
//!
//! #[linkme::distributed_slice(EXTENSIONS)]
//! #[linkme(crate = relic_registry::linkme)]
//! static MY_EXTENSION: ExtensionDescriptor = ExtensionDescriptor {
//!     name: "myext",
//!     powers: &[&GLOW],
//!     conditions: &[],
//!     setup: Some(setup),
//! };
//! ```

use std::collections::HashSet;

use linkme::distributed_slice;
use relic_core::{ConditionType, PowerType};
use tracing::warn;

use crate::builder::RegistryBuilder;
use crate::error::RegistryResult;

/// Hook run after an extension's types are registered.
pub type SetupFn = fn(&mut RegistryBuilder, &relic_core::Extension) -> RegistryResult<()>;

/// Static description of an extension.
pub struct ExtensionDescriptor {
    /// Extension name; its lowercase form is the key namespace.
    pub name: &'static str,
    pub powers: &'static [&'static PowerType],
    pub conditions: &'static [&'static ConditionType],
    /// Registers adapters, overrides and description resolvers.
    pub setup: Option<SetupFn>,
}

/// Every statically linked extension.
#[distributed_slice]
pub static EXTENSIONS: [ExtensionDescriptor];

/// Collects the linked extensions, dropping later duplicates by name.
pub fn collect_extensions() -> Vec<&'static ExtensionDescriptor> {
    let mut seen = HashSet::new();
    let mut collected = Vec::with_capacity(EXTENSIONS.len());
    for descriptor in EXTENSIONS.iter() {
        if seen.insert(descriptor.name.to_lowercase()) {
            collected.push(descriptor);
        } else {
            warn!(
                extension = descriptor.name,
                "Multiple extensions registered with the same name, using first"
            );
        }
    }
    collected
}
