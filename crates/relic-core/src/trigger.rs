//! Game-event trigger categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// A category of game event that can fire a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    Hit,
    HitTaken,
    Hurt,
    LeftClick,
    RightClick,
    OffhandClick,
    ProjectileHit,
    ProjectileLaunch,
    Sneak,
    Sprint,
    SwapToOffhand,
    SwapToMainhand,
    Tick,
    Consume,
}

impl TriggerType {
    /// Every trigger, in catalog order.
    pub const ALL: [TriggerType; 14] = [
        Self::Hit,
        Self::HitTaken,
        Self::Hurt,
        Self::LeftClick,
        Self::RightClick,
        Self::OffhandClick,
        Self::ProjectileHit,
        Self::ProjectileLaunch,
        Self::Sneak,
        Self::Sprint,
        Self::SwapToOffhand,
        Self::SwapToMainhand,
        Self::Tick,
        Self::Consume,
    ];

    /// Returns the canonical upper-case name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::HitTaken => "HIT_TAKEN",
            Self::Hurt => "HURT",
            Self::LeftClick => "LEFT_CLICK",
            Self::RightClick => "RIGHT_CLICK",
            Self::OffhandClick => "OFFHAND_CLICK",
            Self::ProjectileHit => "PROJECTILE_HIT",
            Self::ProjectileLaunch => "PROJECTILE_LAUNCH",
            Self::Sneak => "SNEAK",
            Self::Sprint => "SPRINT",
            Self::SwapToOffhand => "SWAP_TO_OFFHAND",
            Self::SwapToMainhand => "SWAP_TO_MAINHAND",
            Self::Tick => "TICK",
            Self::Consume => "CONSUME",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TriggerType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| KeyError::malformed(s, "unknown trigger"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for trigger in TriggerType::ALL {
            assert_eq!(trigger.name().parse::<TriggerType>().unwrap(), trigger);
        }
        assert_eq!("right_click".parse::<TriggerType>().unwrap(), TriggerType::RightClick);
        assert!("jump".parse::<TriggerType>().is_err());
    }

    #[test]
    fn test_serde_matches_name() {
        let json = serde_json::to_string(&TriggerType::SwapToMainhand).unwrap();
        assert_eq!(json, "\"SWAP_TO_MAINHAND\"");
    }
}
