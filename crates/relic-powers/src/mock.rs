//! A recording engine for power tests.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use relic_core::{EntityId, PotionEffect, World};

const BASE_HEALTH: f64 = 20.0;

#[derive(Default)]
pub struct MockWorld {
    pub effects: Mutex<HashMap<EntityId, Vec<PotionEffect>>>,
    pub health: Mutex<HashMap<EntityId, (f64, f64)>>,
    /// Keys of cooldowns that are currently running.
    pub cooling: Mutex<HashSet<String>>,
    /// Remaining durability; `None` is unbreakable.
    pub durability: Mutex<Option<u32>>,
    pub cone: Vec<EntityId>,
    pub roll: u32,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_durability(self, durability: u32) -> Self {
        *self.durability.lock() = Some(durability);
        self
    }

    pub fn with_cone(mut self, cone: Vec<EntityId>) -> Self {
        self.cone = cone;
        self
    }

    pub fn with_roll(mut self, roll: u32) -> Self {
        self.roll = roll;
        self
    }

    pub fn effects_of(&self, entity: EntityId) -> Vec<PotionEffect> {
        self.effects.lock().get(&entity).cloned().unwrap_or_default()
    }
}

impl World for MockWorld {
    fn check_cooldown(&self, _player: EntityId, key: &str, ticks: u64) -> bool {
        let mut cooling = self.cooling.lock();
        if cooling.contains(key) {
            return false;
        }
        if ticks > 0 {
            cooling.insert(key.to_string());
        }
        true
    }

    fn consume_durability(&self, _player: EntityId, cost: u32) -> bool {
        let mut durability = self.durability.lock();
        match durability.as_mut() {
            Some(remaining) if *remaining < cost => false,
            Some(remaining) => {
                *remaining -= cost;
                true
            }
            None => true,
        }
    }

    fn active_effects(&self, entity: EntityId) -> Vec<PotionEffect> {
        self.effects_of(entity)
    }

    fn add_effect(&self, entity: EntityId, effect: PotionEffect) {
        // Like the game, a new health boost raises max health and resets
        // current health to the unboosted maximum.
        if effect.kind == "HEALTH_BOOST" {
            let max = BASE_HEALTH + 4.0 * f64::from(effect.amplifier + 1);
            self.health.lock().insert(entity, (BASE_HEALTH, max));
        }
        let mut effects = self.effects.lock();
        let active = effects.entry(entity).or_default();
        active.retain(|existing| existing.kind != effect.kind);
        active.push(effect);
    }

    fn remove_effect(&self, entity: EntityId, kind: &str) {
        if let Some(active) = self.effects.lock().get_mut(&entity) {
            active.retain(|existing| existing.kind != kind);
        }
    }

    fn health(&self, entity: EntityId) -> f64 {
        self.health.lock().get(&entity).map_or(BASE_HEALTH, |(health, _)| *health)
    }

    fn max_health(&self, entity: EntityId) -> f64 {
        self.health.lock().get(&entity).map_or(BASE_HEALTH, |(_, max)| *max)
    }

    fn set_health(&self, entity: EntityId, health: f64) {
        let max = self.max_health(entity);
        self.health.lock().insert(entity, (health, max));
    }

    fn entities_in_cone(&self, _player: EntityId, _range: u32, _facing: f64) -> Vec<EntityId> {
        self.cone.clone()
    }

    fn random_below(&self, bound: u32) -> u32 {
        self.roll % bound.max(1)
    }
}
