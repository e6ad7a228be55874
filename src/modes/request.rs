//! Battle requests as callers submit them, one struct per mode.

use crate::character::loadout::PlayerLoadout;
use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Request format generation for stage battles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageVersion {
    /// Older format: no runes, collection or staking; rewards drawn before combat
    Legacy,
    /// Rewards drawn after a won battle
    #[default]
    Current,
}

impl StageVersion {
    pub fn name(&self) -> &'static str {
        match self {
            StageVersion::Legacy => "legacy",
            StageVersion::Current => "current",
        }
    }

    /// Rejects loadout features this version cannot carry.
    pub fn check_loadout(&self, loadout: &PlayerLoadout) -> Result<(), InputError> {
        if *self == StageVersion::Current {
            return Ok(());
        }
        let unsupported = if !loadout.runes.is_empty() {
            Some("runes")
        } else if !loadout.collection.is_empty() {
            Some("collection")
        } else if loadout.staking_level.is_some() {
            Some("staking")
        } else {
            None
        };
        match unsupported {
            Some(field) => Err(InputError::UnsupportedForVersion {
                version: self.name(),
                field,
            }),
            None => Ok(()),
        }
    }
}

/// Main and event stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRequest {
    #[serde(default)]
    pub version: StageVersion,
    pub stage_id: u32,
    pub loadouts: Vec<PlayerLoadout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaRequest {
    pub me: PlayerLoadout,
    pub opponent: PlayerLoadout,
    pub my_score: i64,
    pub opponent_score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidRequest {
    pub raid_id: u32,
    pub loadouts: Vec<PlayerLoadout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerRequest {
    pub floor: u32,
    /// Highest floor cleared so far, 0 before the first clear
    pub cleared_floor: u32,
    pub loadouts: Vec<PlayerLoadout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRequest {
    pub stage_id: u32,
    /// Highest stage cleared so far
    pub cleared_stage: u32,
    /// Signed so that bad caller input reaches validation instead of wrapping
    pub play_count: i32,
    pub loadouts: Vec<PlayerLoadout>,
}

/// Any battle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleRequest {
    Stage(StageRequest),
    Arena(ArenaRequest),
    Raid(RaidRequest),
    Tower(TowerRequest),
    Sweep(SweepRequest),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::loadout::RuneSlot;

    #[test]
    fn test_legacy_rejects_newer_inputs() {
        let mut loadout = PlayerLoadout::new(1, 100, 1);
        assert!(StageVersion::Legacy.check_loadout(&loadout).is_ok());

        loadout.staking_level = Some(2);
        assert_eq!(
            StageVersion::Legacy.check_loadout(&loadout),
            Err(InputError::UnsupportedForVersion {
                version: "legacy",
                field: "staking"
            })
        );

        loadout.runes.push(RuneSlot {
            rune_id: 1,
            level: 1,
        });
        assert_eq!(
            StageVersion::Legacy.check_loadout(&loadout),
            Err(InputError::UnsupportedForVersion {
                version: "legacy",
                field: "runes"
            })
        );
        assert!(StageVersion::Current.check_loadout(&loadout).is_ok());
    }

    #[test]
    fn test_stage_request_defaults_to_current() {
        let request: StageRequest = serde_json::from_str(
            r#"{"stage_id": 3, "loadouts": [{"actor_id": 1, "character_id": 100, "level": 1}]}"#,
        )
        .unwrap();
        assert_eq!(request.version, StageVersion::Current);
    }
}
