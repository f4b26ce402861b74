//! Fixed value catalogs exposed through property presets.

/// Potion effect type names accepted by potion-based powers.
pub const POTION_EFFECT_TYPES: [&str; 30] = [
    "SPEED",
    "SLOW",
    "FAST_DIGGING",
    "SLOW_DIGGING",
    "INCREASE_DAMAGE",
    "HEAL",
    "HARM",
    "JUMP",
    "CONFUSION",
    "REGENERATION",
    "DAMAGE_RESISTANCE",
    "FIRE_RESISTANCE",
    "WATER_BREATHING",
    "INVISIBILITY",
    "BLINDNESS",
    "NIGHT_VISION",
    "HUNGER",
    "WEAKNESS",
    "POISON",
    "WITHER",
    "HEALTH_BOOST",
    "ABSORPTION",
    "SATURATION",
    "GLOWING",
    "LEVITATION",
    "LUCK",
    "UNLUCK",
    "SLOW_FALLING",
    "CONDUIT_POWER",
    "DOLPHINS_GRACE",
];

/// Returns the canonical name of a potion effect type, ignoring case.
pub fn potion_effect_type(name: &str) -> Option<&'static str> {
    POTION_EFFECT_TYPES
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Whether an engine effect is heard or seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Sound,
    Visual,
}

/// An entry of the engine effect catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineEffect {
    pub name: &'static str,
    pub kind: EffectKind,
}

const fn sound(name: &'static str) -> EngineEffect {
    EngineEffect {
        name,
        kind: EffectKind::Sound,
    }
}

const fn visual(name: &'static str) -> EngineEffect {
    EngineEffect {
        name,
        kind: EffectKind::Visual,
    }
}

/// The engine's world-effect catalog.
pub const ENGINE_EFFECTS: &[EngineEffect] = &[
    sound("CLICK2"),
    sound("CLICK1"),
    sound("BOW_FIRE"),
    sound("DOOR_TOGGLE"),
    sound("IRON_DOOR_TOGGLE"),
    sound("TRAPDOOR_TOGGLE"),
    sound("FENCE_GATE_TOGGLE"),
    sound("EXTINGUISH"),
    sound("RECORD_PLAY"),
    sound("GHAST_SHRIEK"),
    sound("GHAST_SHOOT"),
    sound("BLAZE_SHOOT"),
    sound("ZOMBIE_CHEW_WOODEN_DOOR"),
    sound("ZOMBIE_CHEW_IRON_DOOR"),
    sound("ZOMBIE_DESTROY_DOOR"),
    visual("SMOKE"),
    sound("STEP_SOUND"),
    visual("POTION_BREAK"),
    visual("INSTANT_POTION_BREAK"),
    visual("ENDER_SIGNAL"),
    visual("MOBSPAWNER_FLAMES"),
    sound("BREWING_STAND_BREW"),
    sound("CHORUS_FLOWER_GROW"),
    sound("CHORUS_FLOWER_DEATH"),
    sound("PORTAL_TRAVEL"),
    sound("ENDEREYE_LAUNCH"),
    sound("FIREWORK_SHOOT"),
    visual("VILLAGER_PLANT_GROW"),
    visual("DRAGON_BREATH"),
    sound("ANVIL_BREAK"),
    sound("ANVIL_USE"),
    sound("ANVIL_LAND"),
    sound("ENDERDRAGON_SHOOT"),
    sound("WITHER_BREAK_BLOCK"),
    sound("WITHER_SHOOT"),
    sound("ZOMBIE_INFECT"),
    sound("ZOMBIE_CONVERTED_VILLAGER"),
    sound("BAT_TAKEOFF"),
    visual("END_GATEWAY_SPAWN"),
    sound("ENDERDRAGON_GROWL"),
];

/// Iterates the names of the visual effects, in catalog order.
pub fn visual_effects() -> impl Iterator<Item = &'static str> {
    ENGINE_EFFECTS
        .iter()
        .filter(|effect| effect.kind == EffectKind::Visual)
        .map(|effect| effect.name)
}
