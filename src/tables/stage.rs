//! Stage, tower floor and raid rows.

use super::sheet::SheetRow;
use super::DropTableId;
use serde::{Deserialize, Serialize};

/// One enemy slot in a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveEnemy {
    pub character_id: u32,
    pub level: u32,
}

/// An ordered batch of enemies fought together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveDef {
    /// 1-based position within the stage
    pub number: u32,
    pub enemies: Vec<WaveEnemy>,
    /// Actions allowed while this wave is active
    #[serde(default)]
    pub turn_budget: Option<u32>,
    /// Drawn right after this wave is cleared when rewards are per wave
    #[serde(default)]
    pub drop_table: Option<DropTableId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    #[default]
    Main,
    Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRow {
    pub id: u32,
    #[serde(default)]
    pub kind: StageKind,
    pub waves: Vec<WaveDef>,
    /// Run-wide action budget; the constants default applies when omitted
    #[serde(default)]
    pub turn_budget: Option<u32>,
    /// Clear reward
    #[serde(default)]
    pub drop_table: Option<DropTableId>,
}

impl SheetRow for StageRow {
    type Key = u32;
    const NAME: &'static str = "StageSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

/// One floor of the infinite tower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRow {
    pub floor: u32,
    pub waves: Vec<WaveDef>,
    /// Extra enemy stat percent per floor above the first
    #[serde(default)]
    pub stat_growth_pct: i64,
    #[serde(default)]
    pub turn_budget: Option<u32>,
    /// Drawn once when the whole floor is cleared
    #[serde(default)]
    pub drop_table: Option<DropTableId>,
}

impl SheetRow for FloorRow {
    type Key = u32;
    const NAME: &'static str = "TowerFloorSheet";

    fn key(&self) -> u32 {
        self.floor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidRewardTier {
    pub min_score: i64,
    pub drop_table: DropTableId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidRow {
    pub id: u32,
    pub boss: WaveEnemy,
    pub turn_budget: u32,
    /// Any order in the file; resolved by highest qualifying `min_score`
    #[serde(default)]
    pub reward_tiers: Vec<RaidRewardTier>,
}

impl RaidRow {
    /// Highest tier whose threshold the score reaches.
    pub fn reward_tier(&self, score: i64) -> Option<&RaidRewardTier> {
        self.reward_tiers
            .iter()
            .filter(|t| t.min_score <= score)
            .max_by_key(|t| (t.min_score, t.drop_table))
    }
}

impl SheetRow for RaidRow {
    type Key = u32;
    const NAME: &'static str = "RaidSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raid_reward_tier_selection() {
        let raid = RaidRow {
            id: 1,
            boss: WaveEnemy {
                character_id: 900,
                level: 1,
            },
            turn_budget: 50,
            reward_tiers: vec![
                RaidRewardTier {
                    min_score: 1000,
                    drop_table: 3,
                },
                RaidRewardTier {
                    min_score: 0,
                    drop_table: 1,
                },
                RaidRewardTier {
                    min_score: 500,
                    drop_table: 2,
                },
            ],
        };
        assert_eq!(raid.reward_tier(0).map(|t| t.drop_table), Some(1));
        assert_eq!(raid.reward_tier(750).map(|t| t.drop_table), Some(2));
        assert_eq!(raid.reward_tier(5000).map(|t| t.drop_table), Some(3));
        assert!(raid.reward_tier(-1).is_none());
    }

    #[test]
    fn test_stage_row_json_defaults() {
        let row: StageRow = serde_json::from_str(
            r#"{"id": 1, "waves": [{"number": 1, "enemies": [{"character_id": 200, "level": 1}]}]}"#,
        )
        .unwrap();
        assert_eq!(row.kind, StageKind::Main);
        assert_eq!(row.turn_budget, None);
        assert_eq!(row.waves[0].drop_table, None);
    }
}
