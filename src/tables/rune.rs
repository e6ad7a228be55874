//! Rune, rune synergy and staking rows.

use super::sheet::SheetRow;
use crate::character::loadout::GrantedSkill;
use crate::character::stats::StatModifier;
use serde::{Deserialize, Serialize};

/// Stat options (and optionally a skill) of one rune at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneOptionRow {
    pub rune_id: u32,
    pub level: u32,
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
    #[serde(default)]
    pub skill: Option<GrantedSkill>,
}

impl SheetRow for RuneOptionRow {
    type Key = (u32, u32);
    const NAME: &'static str = "RuneOptionSheet";

    fn key(&self) -> (u32, u32) {
        (self.rune_id, self.level)
    }
}

/// Synergy bonus unlocked once the summed level of equipped runes reaches
/// `threshold`. The bonus percent applies to HP, ATK and DEF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneLevelBonusRow {
    pub threshold: u32,
    pub bonus_pct: i64,
}

impl SheetRow for RuneLevelBonusRow {
    type Key = u32;
    const NAME: &'static str = "RuneLevelBonusSheet";

    fn key(&self) -> u32 {
        self.threshold
    }
}

/// Stat bonus granted by a staking tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingBonusRow {
    pub level: u32,
    pub modifiers: Vec<StatModifier>,
}

impl SheetRow for StakingBonusRow {
    type Key = u32;
    const NAME: &'static str = "StakingBonusSheet";

    fn key(&self) -> u32 {
        self.level
    }
}
