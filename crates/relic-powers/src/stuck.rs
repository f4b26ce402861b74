//! `stuck`: pins the target in place, on hit or in a cone on right click.
//!
//! Stuck entities are slowed and cannot jump for `duration` ticks, and the
//! engine should cancel their teleports during that window. Each power
//! instance remembers whom it stuck in a [`StuckCache`], which the engine's
//! teleport handler queries through [`Stuck::should_cancel_teleport`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use relic_core::SectionResult;
use relic_core::prelude::*;
use tracing::trace;
use uuid::Uuid;

use crate::base::{BASE_POWER, BasePower};

/// Entries not looked at for this long are forgotten.
pub const EXPIRE_AFTER_ACCESS: Duration = Duration::from_secs(10 * 60);

/// Length of a game tick.
const TICK: Duration = Duration::from_millis(50);

const SLOW_AMPLIFIER: u32 = 10;
const JUMP_AMPLIFIER: u32 = 128;

struct StuckEntry {
    since: Instant,
    accessed: Instant,
}

/// When each entity was last stuck, with expire-after-access eviction.
#[derive(Default)]
pub struct StuckCache {
    entries: Mutex<HashMap<EntityId, StuckEntry>>,
}

impl StuckCache {
    /// Records that `entity` was stuck at `now`.
    pub fn mark(&self, entity: EntityId, now: Instant) {
        let mut entries = self.entries.lock();
        Self::evict(&mut entries, now);
        entries.insert(
            entity,
            StuckEntry {
                since: now,
                accessed: now,
            },
        );
    }

    /// When `entity` was last stuck. Counts as an access.
    pub fn stuck_since(&self, entity: EntityId, now: Instant) -> Option<Instant> {
        let mut entries = self.entries.lock();
        Self::evict(&mut entries, now);
        let entry = entries.get_mut(&entity)?;
        entry.accessed = now;
        Some(entry.since)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn evict(entries: &mut HashMap<EntityId, StuckEntry>, now: Instant) {
        entries.retain(|_, entry| {
            now.saturating_duration_since(entry.accessed) < EXPIRE_AFTER_ACCESS
        });
    }
}

impl fmt::Debug for StuckCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StuckCache").field("len", &self.len()).finish()
    }
}

#[derive(Debug, Properties)]
pub struct Stuck {
    #[property(parent)]
    pub base: BasePower,

    /// Ticks between two uses.
    #[property(order = 0)]
    pub cooldown: u64,

    /// Ticks the target stays stuck.
    #[property(order = 1)]
    pub duration: u32,

    /// One in `chance` hits sticks the target.
    pub chance: u32,
    pub cost: u32,
    pub cost_aoe: u32,
    pub cost_per_entity: u32,
    pub range: u32,
    /// Cone half-angle in degrees.
    pub facing: f64,
    pub allow_hit: bool,
    pub allow_aoe: bool,

    id: Uuid,
    stuck: StuckCache,
}

impl Default for Stuck {
    fn default() -> Self {
        Self {
            base: BasePower::default(),
            cooldown: 200,
            duration: 100,
            chance: 3,
            cost: 0,
            cost_aoe: 0,
            cost_per_entity: 0,
            range: 10,
            facing: 30.0,
            allow_hit: true,
            allow_aoe: false,
            id: Uuid::new_v4(),
            stuck: StuckCache::default(),
        }
    }
}

impl Stuck {
    /// Whether `entity` is still stuck by this power at `now`.
    pub fn is_stuck(&self, entity: EntityId, now: Instant) -> bool {
        self.stuck
            .stuck_since(entity, now)
            .is_some_and(|since| now.saturating_duration_since(since) <= TICK * self.duration)
    }

    /// Whether a teleport of `entity` must be cancelled.
    ///
    /// Teleports issued by commands always go through.
    pub fn should_cancel_teleport(&self, entity: EntityId, now: Instant, by_command: bool) -> bool {
        !by_command && self.is_stuck(entity, now)
    }

    pub fn cache(&self) -> &StuckCache {
        &self.stuck
    }

    fn cooldown_key(&self) -> String {
        format!("stuck.{}", self.id)
    }

    fn stick(&self, world: &dyn World, entity: EntityId) {
        trace!(%entity, duration = self.duration, "Sticking entity");
        self.stuck.mark(entity, Instant::now());
        world.add_effect(entity, PotionEffect::new("SLOW", self.duration, SLOW_AMPLIFIER));
        world.add_effect(entity, PotionEffect::new("JUMP", self.duration, JUMP_AMPLIFIER));
    }
}

impl PropertyHolder for Stuck {
    fn key(&self) -> Option<NamespacedKey> {
        Some(NamespacedKey::new("relic", "stuck"))
    }

    fn init(&mut self, section: &dyn ConfigSection) -> SectionResult<()> {
        self.base.load(section, false)?;
        self.facing = section.read_or("facing", 30.0)?;
        self.chance = section.read_or("chance", 3)?;
        self.cost = section.read_first_or(&["cost", "consumption"], 0)?;
        self.cooldown = section.read_or("cooldown", 200)?;
        self.duration = section.read_or("duration", 100)?;
        self.cost_aoe = section.read_first_or(&["costAoe", "costAOE"], 0)?;
        self.cost_per_entity = section.read_or("costPerEntity", 0)?;
        self.range = section.read_or("range", 10)?;
        self.allow_hit = section.read_or("allowHit", true)?;
        self.allow_aoe = section.read_or("allowAoe", false)?;
        Ok(())
    }

    fn save(&self, section: &mut dyn ConfigSection) {
        self.base.store(section);
        section.write("chance", self.chance);
        section.write("cost", self.cost);
        section.write("duration", self.duration);
        section.write("cooldown", self.cooldown);
        section.write("range", self.range);
        section.write("facing", self.facing);
        section.write("costAoe", self.cost_aoe);
        section.write("costPerEntity", self.cost_per_entity);
        section.write("allowHit", self.allow_hit);
        section.write("allowAoe", self.allow_aoe);
    }
}

impl Power for Stuck {
    fn display_text(&self) -> String {
        self.base.display_or(|| {
            let percent = 100.0 / f64::from(self.chance.max(1));
            format!(
                "{percent:.1}% chance to make the target stuck for {} ticks, cooldown {:.1}s",
                self.duration,
                self.cooldown as f64 / 20.0
            )
        })
    }
}

pub struct StuckImpl {
    power: Arc<Stuck>,
}

impl_pimpl!(StuckImpl for Stuck: [dyn PowerHit, dyn PowerRightClick]);

impl PowerHit for StuckImpl {
    fn hit(&self, ctx: &TriggerContext<'_>, target: EntityId, damage: f64) -> PowerOutcome<f64> {
        let power = &*self.power;
        if !power.allow_hit {
            return PowerOutcome::Noop;
        }
        if !ctx
            .world
            .check_cooldown(ctx.player, &power.cooldown_key(), power.cooldown)
        {
            return PowerOutcome::Cooldown;
        }
        if ctx.world.random_below(power.chance.max(1)) != 0 {
            return PowerOutcome::Noop;
        }
        if !ctx.world.consume_durability(ctx.player, power.cost) {
            return PowerOutcome::Cost;
        }
        power.stick(ctx.world, target);
        PowerOutcome::Success(damage)
    }
}

impl PowerRightClick for StuckImpl {
    fn right_click(&self, ctx: &TriggerContext<'_>) -> PowerOutcome {
        let power = &*self.power;
        if !power.allow_aoe {
            return PowerOutcome::Noop;
        }
        if !ctx
            .world
            .check_cooldown(ctx.player, &power.cooldown_key(), power.cooldown)
        {
            return PowerOutcome::Cooldown;
        }
        if !ctx.world.consume_durability(ctx.player, power.cost_aoe) {
            return PowerOutcome::Cost;
        }
        for entity in ctx
            .world
            .entities_in_cone(ctx.player, power.range, power.facing)
        {
            if !ctx.world.consume_durability(ctx.player, power.cost_per_entity) {
                continue;
            }
            power.stick(ctx.world, entity);
        }
        PowerOutcome::ok()
    }
}

pub static STUCK: PowerType = power_type!(Stuck, parent: BASE_POWER)
    .with_meta(TypeMeta::new().with_implementation(StuckImpl::create))
    .with_capabilities(StuckImpl::CAPABILITIES);
