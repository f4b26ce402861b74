//! The opaque engine surface powers act through.
//!
//! Relic never inspects what a power does to the world; it only hands the
//! power a [`TriggerContext`] carrying an engine implementing [`World`].

use std::fmt;

use uuid::Uuid;

/// Identifier of a living entity in the engine.
pub type EntityId = Uuid;

/// A timed status effect on an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PotionEffect {
    /// Effect type name, one of [`POTION_EFFECT_TYPES`](crate::POTION_EFFECT_TYPES).
    pub kind: String,
    /// Remaining duration in ticks.
    pub duration: u32,
    pub amplifier: u32,
    pub ambient: bool,
}

impl PotionEffect {
    pub fn new(kind: impl Into<String>, duration: u32, amplifier: u32) -> Self {
        Self {
            kind: kind.into(),
            duration,
            amplifier,
            ambient: false,
        }
    }

    pub fn ambient(mut self, ambient: bool) -> Self {
        self.ambient = ambient;
        self
    }
}

/// Engine services available to powers.
pub trait World: Send + Sync {
    /// Starts a named cooldown for `player` if it is not running.
    ///
    /// Returns `false` while a previous cooldown with the same key is active.
    fn check_cooldown(&self, player: EntityId, key: &str, ticks: u64) -> bool;

    /// Charges `cost` durability from the item `player` is using.
    fn consume_durability(&self, player: EntityId, cost: u32) -> bool;

    fn active_effects(&self, entity: EntityId) -> Vec<PotionEffect>;

    /// Applies an effect, replacing any effect of the same kind.
    fn add_effect(&self, entity: EntityId, effect: PotionEffect);

    fn remove_effect(&self, entity: EntityId, kind: &str);

    fn health(&self, entity: EntityId) -> f64;

    fn max_health(&self, entity: EntityId) -> f64;

    fn set_health(&self, entity: EntityId, health: f64);

    /// Living entities within `range` of `player` and inside a cone of
    /// `facing` degrees around its view direction.
    fn entities_in_cone(&self, player: EntityId, range: u32, facing: f64) -> Vec<EntityId>;

    /// Uniform integer in `0..bound`.
    fn random_below(&self, bound: u32) -> u32;
}

/// The situation a power is triggered in.
#[derive(Clone, Copy)]
pub struct TriggerContext<'a> {
    pub world: &'a dyn World,
    /// The player holding the item.
    pub player: EntityId,
}

impl<'a> TriggerContext<'a> {
    pub fn new(world: &'a dyn World, player: EntityId) -> Self {
        Self { world, player }
    }
}

impl fmt::Debug for TriggerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerContext")
            .field("player", &self.player)
            .finish_non_exhaustive()
    }
}

/// What happened when a power was triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerOutcome<T = ()> {
    /// The power took effect.
    Success(T),
    /// The power chose not to act.
    Noop,
    /// The power is cooling down.
    Cooldown,
    /// The item could not pay the cost.
    Cost,
    /// The power failed to act.
    Fail,
}

impl<T> PowerOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Maps the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PowerOutcome<U> {
        match self {
            Self::Success(value) => PowerOutcome::Success(f(value)),
            Self::Noop => PowerOutcome::Noop,
            Self::Cooldown => PowerOutcome::Cooldown,
            Self::Cost => PowerOutcome::Cost,
            Self::Fail => PowerOutcome::Fail,
        }
    }
}

impl PowerOutcome {
    pub fn ok() -> Self {
        Self::Success(())
    }
}
