//! Relic Core - types shared by the registry and every extension.
//!
//! This crate provides:
//!
//! - [`NamespacedKey`] and [`Extension`] identity
//! - [`Power`] / [`Condition`] and the [`ConfigSection`] they persist into
//! - [`TypeDescriptor`] statics describing each type, with [`TypeMeta`]
//! - Declared properties ([`PropertyDecl`], `#[derive(Properties)]`)
//! - Capability ids, the standard trigger capabilities, and [`Pimpl`]
//! - The trigger, potion and engine-effect catalogs
//!
//! # Declaring a power
//!
//! ```rust,ignore
//! use relic_core::prelude::*;
//!
//! #[derive(Debug, Default, Properties)]
//! pub struct Glow {
//!     #[property(order = 0, required)]
//!     pub radius: u32,
//! }
//!
//! impl PropertyHolder for Glow {
//!     fn key(&self) -> Option<NamespacedKey> {
//!         Some(NamespacedKey::new("myext", "glow"))
//!     }
//! }
//!
//! impl Power for Glow {}
//!
//! pub static GLOW: PowerType = power_type!(Glow).with_meta(TypeMeta::new());
//! ```

extern crate self as relic_core;

pub mod capability;
pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod extension;
pub mod game;
pub mod holder;
pub mod key;
pub mod property;
pub mod trigger;

mod macros;

pub use capability::{
    Capability, CapabilityId, CapabilityView, Pimpl, PowerConsume, PowerHit, PowerHitTaken,
    PowerHurt, PowerLeftClick, PowerOffhandClick, PowerPlain, PowerProjectileHit,
    PowerProjectileLaunch, PowerRightClick, PowerSneak, PowerSprint, PowerSwap, PowerTick,
    downcast_view,
};
pub use catalog::{
    ENGINE_EFFECTS, EffectKind, EngineEffect, POTION_EFFECT_TYPES, potion_effect_type,
    visual_effects,
};
pub use descriptor::{
    ConditionType, Factory, ImplFactory, ParentLink, PowerType, TypeDescriptor, TypeKind, TypeMeta,
};
pub use error::{BoxError, KeyError, KeyResult, SectionError, SectionResult};
pub use extension::Extension;
pub use game::{EntityId, PotionEffect, PowerOutcome, TriggerContext, World};
pub use holder::{AsAny, Condition, ConfigSection, ConfigSectionExt, Power, PropertyHolder};
pub use key::{NamespacedKey, split_key};
pub use property::{AcceptedValues, Accessor, DeclareProperties, Preset, Projection, PropertyDecl};
pub use relic_macros::Properties;
pub use trigger::TriggerType;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Commonly used items for extension authors.
pub mod prelude {
    pub use super::capability::*;
    pub use super::game::{EntityId, PotionEffect, PowerOutcome, TriggerContext, World};
    pub use super::holder::*;
    pub use super::{
        AcceptedValues, ConditionType, DeclareProperties, Extension, NamespacedKey, PowerType,
        Preset, Properties, TypeDescriptor, TypeKind, TypeMeta, TriggerType, condition_type,
        impl_pimpl, power_type,
    };
}
