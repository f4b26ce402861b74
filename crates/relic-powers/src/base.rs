//! The abstract parent of every built-in power.

use relic_core::SectionResult;
use relic_core::prelude::*;
use tracing::debug;

/// Settings shared by every built-in power.
///
/// Concrete powers embed it as `#[property(parent)] base: BasePower`, which
/// makes `triggers` and `display` appear in their property tables.
#[derive(Debug, Clone, Default, Properties)]
pub struct BasePower {
    /// Triggers the item fires this power on. Empty means every trigger
    /// the power supports.
    #[property(accepted(preset = Triggers))]
    pub triggers: Vec<TriggerType>,

    /// Replaces the generated display text when not empty.
    #[property]
    pub display: String,
}

impl BasePower {
    /// Loads the shared settings.
    ///
    /// Configured triggers are ignored when the power's trigger list is
    /// immutable.
    pub fn load(&mut self, section: &dyn ConfigSection, immutable_trigger: bool) -> SectionResult<()> {
        let triggers: Vec<TriggerType> = section.read_or("triggers", Vec::new())?;
        if immutable_trigger {
            if !triggers.is_empty() {
                debug!(?triggers, "Ignoring configured triggers of an immutable power");
            }
        } else {
            self.triggers = triggers;
        }
        self.display = section.read_or("display", String::new())?;
        Ok(())
    }

    pub fn store(&self, section: &mut dyn ConfigSection) {
        if !self.triggers.is_empty() {
            section.write("triggers", &self.triggers);
        }
        if !self.display.is_empty() {
            section.write("display", &self.display);
        }
    }

    /// The configured display text, or `generated` when none is set.
    pub fn display_or(&self, generated: impl FnOnce() -> String) -> String {
        if self.display.is_empty() {
            generated()
        } else {
            self.display.clone()
        }
    }
}

impl PropertyHolder for BasePower {
    fn key(&self) -> Option<NamespacedKey> {
        None
    }
}

impl Power for BasePower {}

pub static BASE_POWER: PowerType = power_type!(abstract BasePower);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn section(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_load_and_store() {
        let mut base = BasePower::default();
        base.load(
            &section(json!({ "triggers": ["RIGHT_CLICK", "SNEAK"], "display": "Zap" })),
            false,
        )
        .unwrap();
        assert_eq!(base.triggers, [TriggerType::RightClick, TriggerType::Sneak]);
        assert_eq!(base.display_or(|| "generated".into()), "Zap");

        let mut saved = Map::new();
        base.store(&mut saved);
        assert_eq!(saved["triggers"], json!(["RIGHT_CLICK", "SNEAK"]));
        assert_eq!(saved["display"], json!("Zap"));
    }

    #[test]
    fn test_immutable_triggers_are_not_loaded() {
        let mut base = BasePower::default();
        base.load(&section(json!({ "triggers": ["HIT"] })), true).unwrap();
        assert!(base.triggers.is_empty());
        assert_eq!(base.display_or(|| "generated".into()), "generated");

        let mut saved = Map::new();
        base.store(&mut saved);
        assert!(saved.is_empty());
    }

    #[test]
    fn test_declared_properties() {
        let names: Vec<_> = BasePower::declared_properties()
            .iter()
            .map(|decl| decl.name())
            .collect();
        assert_eq!(names, ["triggers", "display"]);
        assert_eq!(
            BasePower::declared_properties()[0].accepted().map(|a| a.preset()),
            Some(Preset::Triggers)
        );
    }
}
