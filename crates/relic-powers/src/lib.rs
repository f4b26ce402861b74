//! Relic Powers - the built-in extension.
//!
//! Linking this crate adds the `relic` extension to
//! [`EXTENSIONS`](relic_registry::EXTENSIONS):
//!
//! | Key | Capabilities | Description |
//! |-----|--------------|-------------|
//! | `relic:potiontick` | `tick` | Keeps a potion effect on the holder |
//! | `relic:stuck` | `hit`, `right_click` | Pins targets in place |
//!
//! Both extend the abstract [`BasePower`]. Setup also registers the
//! `plain` → `right_click` adapter and English property descriptions.

pub mod adapter;
pub mod base;
pub mod potion_tick;
pub mod stuck;

#[cfg(test)]
mod mock;

use relic_core::{Extension, NamespacedKey, PowerPlain, PowerRightClick};
use relic_registry::{EXTENSIONS, ExtensionDescriptor, RegistryBuilder, RegistryResult};

pub use adapter::{PlainRightClick, plain_to_right_click};
pub use base::{BASE_POWER, BasePower};
pub use potion_tick::{POTION_TICK, PotionTick, PotionTickImpl};
pub use stuck::{STUCK, Stuck, StuckCache, StuckImpl};

/// Name of the built-in extension.
pub const EXTENSION_NAME: &str = "relic";

#[relic_registry::linkme::distributed_slice(EXTENSIONS)]
#[linkme(crate = relic_registry::linkme)]
pub static BUILTIN: ExtensionDescriptor = ExtensionDescriptor {
    name: EXTENSION_NAME,
    powers: &[&POTION_TICK, &STUCK],
    conditions: &[],
    setup: Some(setup),
};

fn setup(builder: &mut RegistryBuilder, extension: &Extension) -> RegistryResult<()> {
    builder
        .register_adapter::<dyn PowerPlain, dyn PowerRightClick>(plain_to_right_click)
        .add_description_resolver(extension, "en_US", describe);
    Ok(())
}

fn describe(key: &NamespacedKey, property: &str) -> Option<String> {
    let text = match (key.name(), property) {
        (_, "triggers") => "Events that fire this power",
        (_, "display") => "Text shown on the item instead of the generated summary",
        ("potiontick", "amplifier") => "Effect level, starting from 0",
        ("potiontick", "effect") => "Potion effect to keep on the holder",
        ("potiontick", "interval") => "Ticks between two applications",
        ("potiontick", "duration") => "Ticks each application lasts",
        ("potiontick", "clear") => "Remove the effect instead of applying it",
        ("stuck", "cooldown") => "Ticks between two uses",
        ("stuck", "duration") => "Ticks the target stays stuck",
        _ => return None,
    };
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use relic_core::{Capability, Power, PowerHit, PowerTick, Preset, TriggerType};
    use relic_registry::collect_extensions;
    use serde_json::{Map, Value, json};

    use super::*;

    fn registry() -> relic_registry::Registry {
        let mut builder = RegistryBuilder::new(Extension::new(EXTENSION_NAME));
        let report = builder.register_extension(&BUILTIN);
        assert!(report.is_clean());
        builder.build()
    }

    #[test]
    fn test_extension_is_linked() {
        assert!(
            collect_extensions()
                .iter()
                .any(|descriptor| std::ptr::eq(*descriptor, &BUILTIN))
        );
    }

    #[test]
    fn test_registers_builtin_powers() {
        let registry = registry();
        let potion_tick = registry.parse_key("PotionTick").unwrap();
        let stuck = registry.parse_key("relic:stuck").unwrap();
        assert!(std::ptr::eq(registry.get_power(&potion_tick).unwrap(), &POTION_TICK));
        assert!(std::ptr::eq(registry.get_power(&stuck).unwrap(), &STUCK));
        assert!(registry.meta(&potion_tick).unwrap().immutable_trigger);
        assert_eq!(registry.triggers(&POTION_TICK), [TriggerType::Tick]);
        assert_eq!(
            registry.triggers(&STUCK),
            [TriggerType::Hit, TriggerType::RightClick]
        );
    }

    #[test]
    fn test_property_tables_include_base_properties() {
        let registry = registry();
        let key = NamespacedKey::new("relic", "potiontick");
        let properties = registry.properties(&key).unwrap();
        let names: Vec<_> = properties.names().collect();
        assert_eq!(
            names,
            ["amplifier", "effect", "interval", "duration", "clear", "triggers", "display"]
        );
        let required: Vec<_> = properties.required().map(|entry| entry.name()).collect();
        assert_eq!(required, ["amplifier", "effect"]);
        assert_eq!(
            properties.get("display").map(|entry| entry.declared_by()),
            Some(BASE_POWER.name)
        );

        let effect = properties.get("effect").and_then(|entry| entry.accepted()).unwrap();
        assert_eq!(effect.preset(), Preset::PotionEffectType);
        assert_eq!(registry.accepted_values(&POTION_TICK, effect).len(), 30);
    }

    #[test]
    fn test_descriptions() {
        let registry = registry();
        let key = NamespacedKey::new("relic", "stuck");
        assert_eq!(
            registry.description("en_US", &key, "duration").as_deref(),
            Some("Ticks the target stays stuck")
        );
        assert_eq!(
            registry.description_default(&key, "triggers").as_deref(),
            Some("Events that fire this power")
        );
        assert_eq!(registry.description("en_US", &key, "chance"), None);
        assert_eq!(registry.description("zh_CN", &key, "duration"), None);
    }

    #[test]
    fn test_create_and_adapt() {
        let registry = registry();
        let key = registry.parse_key("stuck").unwrap();
        let section: Map<String, Value> = match json!({ "chance": 1 }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let power: Arc<dyn Power> = registry.create_power(&key, &section).unwrap().into();
        assert_eq!(
            registry
                .properties(&key)
                .and_then(|table| table.get("cooldown"))
                .and_then(|entry| entry.read(&*power)),
            Some(json!(200))
        );
        let pimpl = registry.create_impl(&STUCK, power).unwrap();
        assert_eq!(
            pimpl.capabilities(),
            [
                <dyn PowerHit as Capability>::ID,
                <dyn PowerRightClick as Capability>::ID
            ]
        );
        assert!(pimpl.clone().upcast(<dyn PowerTick as Capability>::ID).is_none());
        assert!(registry.adapters().contains(
            <dyn PowerPlain as Capability>::ID,
            <dyn PowerRightClick as Capability>::ID
        ));
    }
}
