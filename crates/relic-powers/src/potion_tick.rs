//! `potiontick`: keeps a potion effect on the holder while the item ticks.

use std::sync::Arc;

use relic_core::prelude::*;
use relic_core::{SectionError, SectionResult, potion_effect_type};
use serde::de::Error as _;

use crate::base::{BASE_POWER, BasePower};

/// Effect refreshed once its remaining duration drops to this many ticks.
const REFRESH_BELOW: u32 = 5;

#[derive(Debug, Clone, Properties)]
pub struct PotionTick {
    #[property(parent)]
    pub base: BasePower,

    #[property(order = 0)]
    pub amplifier: u32,

    /// Canonical potion effect type name.
    #[property(order = 1, required, accepted(preset = PotionEffectType))]
    pub effect: String,

    /// Cooldown between applications, in ticks.
    #[property(order = 2)]
    pub interval: u64,

    /// Duration of each application, in ticks.
    #[property(order = 3)]
    pub duration: u32,

    /// Remove the effect instead of applying it.
    #[property]
    pub clear: bool,

    /// Durability charged per application.
    pub cost: u32,
}

impl Default for PotionTick {
    fn default() -> Self {
        Self {
            base: BasePower::default(),
            amplifier: 1,
            effect: "SPEED".to_string(),
            interval: 0,
            duration: 60,
            clear: false,
            cost: 0,
        }
    }
}

impl PotionTick {
    fn cooldown_key(&self) -> String {
        format!("potiontick.{}", self.effect)
    }

    fn effect_name(&self) -> String {
        self.effect.to_lowercase().replace('_', " ")
    }
}

impl PropertyHolder for PotionTick {
    fn key(&self) -> Option<NamespacedKey> {
        Some(NamespacedKey::new("relic", "potiontick"))
    }

    fn init(&mut self, section: &dyn ConfigSection) -> SectionResult<()> {
        self.base.load(section, true)?;
        self.amplifier = section.read_or("amplifier", 1)?;
        let effect: String = section.read_or("effect", "SPEED".to_string())?;
        self.effect = potion_effect_type(&effect)
            .ok_or_else(|| SectionError::InvalidValue {
                key: "effect".to_string(),
                source: serde_json::Error::custom(format!("unknown potion effect '{effect}'")),
            })?
            .to_string();
        self.interval = section.read_or("interval", 0)?;
        self.duration = section.read_or("duration", 60)?;
        self.clear = section.read_or("clear", false)?;
        self.cost = section.read_first_or(&["cost", "consumption"], 0)?;
        Ok(())
    }

    fn save(&self, section: &mut dyn ConfigSection) {
        self.base.store(section);
        section.write("amplifier", self.amplifier);
        section.write("effect", &self.effect);
        section.write("interval", self.interval);
        section.write("duration", self.duration);
        section.write("clear", self.clear);
        section.write("cost", self.cost);
    }
}

impl Power for PotionTick {
    fn display_text(&self) -> String {
        self.base.display_or(|| {
            if self.clear {
                format!("Removes {} while held", self.effect_name())
            } else {
                format!("Grants {} {} while held", self.effect_name(), self.amplifier + 1)
            }
        })
    }
}

pub struct PotionTickImpl {
    power: Arc<PotionTick>,
}

impl_pimpl!(PotionTickImpl for PotionTick: [dyn PowerTick]);

impl PowerTick for PotionTickImpl {
    fn tick(&self, ctx: &TriggerContext<'_>) -> PowerOutcome {
        let power = &*self.power;
        let world = ctx.world;
        let health = world.health(ctx.player);

        if !world.check_cooldown(ctx.player, &power.cooldown_key(), power.interval) {
            return PowerOutcome::Cooldown;
        }
        if !world.consume_durability(ctx.player, power.cost) {
            return PowerOutcome::Cost;
        }

        let fresh = || {
            PotionEffect::new(power.effect.as_str(), power.duration, power.amplifier).ambient(true)
        };
        let active = world
            .active_effects(ctx.player)
            .into_iter()
            .find(|effect| effect.kind == power.effect);
        match active {
            Some(_) if power.clear => world.remove_effect(ctx.player, &power.effect),
            Some(active)
                if active.duration <= REFRESH_BELOW || active.amplifier < power.amplifier =>
            {
                world.add_effect(ctx.player, fresh());
            }
            Some(_) => {}
            None if !power.clear => world.add_effect(ctx.player, fresh()),
            None => {}
        }

        // Changing the boost resets health; restore what the holder had.
        if power.effect == "HEALTH_BOOST" {
            if health > 0.0 {
                world.set_health(ctx.player, health.min(world.max_health(ctx.player)));
            }
        }
        PowerOutcome::ok()
    }
}

pub static POTION_TICK: PowerType = power_type!(PotionTick, parent: BASE_POWER)
    .with_meta(
        TypeMeta::new()
            .immutable_trigger()
            .with_implementation(PotionTickImpl::create),
    )
    .with_capabilities(PotionTickImpl::CAPABILITIES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockWorld;
    use serde_json::{Map, Value, json};

    fn section(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn loaded(value: Value) -> PotionTick {
        let mut power = PotionTick::default();
        power.init(&section(value)).unwrap();
        power
    }

    fn tick(power: PotionTick, world: &MockWorld, player: EntityId) -> PowerOutcome {
        let pimpl = PotionTickImpl {
            power: Arc::new(power),
        };
        pimpl.tick(&TriggerContext::new(world, player))
    }

    #[test]
    fn test_init_normalizes_effect_and_reads_legacy_cost() {
        let power = loaded(json!({ "effect": "night_vision", "consumption": 2 }));
        assert_eq!(power.effect, "NIGHT_VISION");
        assert_eq!(power.cost, 2);
        assert_eq!(power.amplifier, 1);
        assert_eq!(power.duration, 60);

        let mut power = PotionTick::default();
        let err = power.init(&section(json!({ "effect": "flying" }))).unwrap_err();
        assert!(matches!(err, SectionError::InvalidValue { ref key, .. } if key == "effect"));
    }

    #[test]
    fn test_save_writes_canonical_keys() {
        let power = loaded(json!({ "effect": "jump", "consumption": 3, "interval": 20 }));
        let mut saved = Map::new();
        power.save(&mut saved);
        assert_eq!(saved["effect"], json!("JUMP"));
        assert_eq!(saved["cost"], json!(3));
        assert_eq!(saved["interval"], json!(20));
        assert!(!saved.contains_key("consumption"));
        assert!(!saved.contains_key("triggers"));
    }

    #[test]
    fn test_tick_applies_missing_effect() {
        let world = MockWorld::new();
        let player = EntityId::new_v4();
        let outcome = tick(loaded(json!({ "effect": "SPEED", "amplifier": 2 })), &world, player);

        assert_eq!(outcome, PowerOutcome::ok());
        assert_eq!(
            world.effects_of(player),
            [PotionEffect::new("SPEED", 60, 2).ambient(true)]
        );
    }

    #[test]
    fn test_tick_refreshes_only_expiring_or_weaker_effects() {
        let world = MockWorld::new();
        let player = EntityId::new_v4();
        world.add_effect(player, PotionEffect::new("SPEED", 40, 1));
        tick(loaded(json!({ "amplifier": 1 })), &world, player);
        assert_eq!(world.effects_of(player)[0].duration, 40);

        world.add_effect(player, PotionEffect::new("SPEED", 5, 1));
        tick(loaded(json!({ "amplifier": 1 })), &world, player);
        assert_eq!(world.effects_of(player)[0].duration, 60);

        world.add_effect(player, PotionEffect::new("SPEED", 40, 0));
        tick(loaded(json!({ "amplifier": 1 })), &world, player);
        assert_eq!(world.effects_of(player)[0].amplifier, 1);
    }

    #[test]
    fn test_tick_clears_effect() {
        let world = MockWorld::new();
        let player = EntityId::new_v4();
        world.add_effect(player, PotionEffect::new("POISON", 100, 0));
        let outcome = tick(loaded(json!({ "effect": "poison", "clear": true })), &world, player);

        assert!(outcome.is_success());
        assert!(world.effects_of(player).is_empty());
    }

    #[test]
    fn test_tick_respects_cooldown_and_cost() {
        let world = MockWorld::new().with_durability(1);
        let player = EntityId::new_v4();

        let power = loaded(json!({ "interval": 20, "cost": 1 }));
        assert!(tick(power.clone(), &world, player).is_success());
        assert_eq!(tick(power, &world, player), PowerOutcome::Cooldown);

        let power = loaded(json!({ "effect": "LUCK", "cost": 1 }));
        assert_eq!(tick(power, &world, player), PowerOutcome::Cost);
        assert!(world.effects_of(player).iter().all(|e| e.kind != "LUCK"));
    }

    #[test]
    fn test_health_boost_keeps_health_across_refresh() {
        let world = MockWorld::new();
        let player = EntityId::new_v4();
        world.add_effect(player, PotionEffect::new("HEALTH_BOOST", 3, 1));
        world.set_health(player, 26.0);
        tick(loaded(json!({ "effect": "HEALTH_BOOST" })), &world, player);
        assert_eq!(world.effects_of(player)[0].duration, 60);
        assert_eq!(world.max_health(player), 28.0);
        assert_eq!(world.health(player), 26.0);
    }

    #[test]
    fn test_health_boost_clamps_to_max_health() {
        let world = MockWorld::new();
        let player = EntityId::new_v4();
        world.health.lock().insert(player, (30.0, 24.0));
        tick(loaded(json!({ "effect": "HEALTH_BOOST", "amplifier": 0 })), &world, player);
        assert_eq!(world.max_health(player), 24.0);
        assert_eq!(world.health(player), 24.0);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(
            loaded(json!({ "effect": "night_vision" })).display_text(),
            "Grants night vision 2 while held"
        );
        assert_eq!(
            loaded(json!({ "effect": "POISON", "clear": true })).display_text(),
            "Removes poison while held"
        );
        assert_eq!(loaded(json!({ "display": "Swift" })).display_text(), "Swift");
    }

    #[test]
    fn test_property_order() {
        let names: Vec<_> = PotionTick::declared_properties()
            .iter()
            .map(|decl| (decl.name(), decl.order()))
            .collect();
        assert_eq!(
            names,
            [
                ("amplifier", 0),
                ("effect", 1),
                ("interval", 2),
                ("duration", 3),
                ("clear", i32::MAX)
            ]
        );
    }
}
