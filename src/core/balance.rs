//! Global combat constants carried inside the balance tables.

use super::constants::*;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One arena score bracket, selected by `opponent_score - own_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaScoreBracket {
    /// Upper bound (inclusive) of the score difference for this bracket
    pub max_difference: i64,
    /// Score change on a win
    pub win: i64,
    /// Score change on a loss
    pub lose: i64,
}

/// Combat constants resolved from balance data.
///
/// Every field falls back to the value in [`super::constants`] when omitted
/// from a table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConstants {
    pub basic_attack_skill_id: u32,
    pub base_hit_chance: i64,
    pub min_hit_chance: i64,
    pub max_hit_chance: i64,
    pub max_crit_chance: i64,
    pub base_crit_damage_percent: i64,
    pub elemental_advantage_percent: i64,
    pub elemental_disadvantage_percent: i64,
    pub min_damage: i64,
    /// Maximum damage of a single hit; 0 disables the cap
    pub damage_cap: i64,
    pub max_damage_reduction_rate: i64,
    pub default_stage_turn_budget: u32,
    pub arena_turn_budget: u32,
    pub arena_score_brackets: Vec<ArenaScoreBracket>,
}

impl Default for CombatConstants {
    fn default() -> Self {
        Self {
            basic_attack_skill_id: BASIC_ATTACK_SKILL_ID,
            base_hit_chance: BASE_HIT_CHANCE,
            min_hit_chance: MIN_HIT_CHANCE,
            max_hit_chance: MAX_HIT_CHANCE,
            max_crit_chance: MAX_CRIT_CHANCE,
            base_crit_damage_percent: BASE_CRIT_DAMAGE_PERCENT,
            elemental_advantage_percent: ELEMENTAL_ADVANTAGE_PERCENT,
            elemental_disadvantage_percent: ELEMENTAL_DISADVANTAGE_PERCENT,
            min_damage: MIN_DAMAGE,
            damage_cap: DAMAGE_CAP,
            max_damage_reduction_rate: MAX_DAMAGE_REDUCTION_RATE,
            default_stage_turn_budget: DEFAULT_STAGE_TURN_BUDGET,
            arena_turn_budget: ARENA_TURN_BUDGET,
            arena_score_brackets: ARENA_SCORE_BRACKETS
                .iter()
                .map(|&(max_difference, win, lose)| ArenaScoreBracket {
                    max_difference,
                    win,
                    lose,
                })
                .collect(),
        }
    }
}

impl CombatConstants {
    /// Arena score change for a finished duel.
    ///
    /// Brackets are checked in table order; an empty table yields 0.
    pub fn arena_score_delta(&self, own_score: i64, opponent_score: i64, won: bool) -> i64 {
        let difference = opponent_score.saturating_sub(own_score);
        let bracket = self
            .arena_score_brackets
            .iter()
            .find(|b| difference <= b.max_difference)
            .or_else(|| self.arena_score_brackets.last());

        match bracket {
            Some(b) if won => b.win,
            Some(b) => b.lose,
            None => 0,
        }
    }

    /// Range checks for every percent the combat math relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_hit_chance", self.min_hit_chance),
            ("max_hit_chance", self.max_hit_chance),
            ("max_crit_chance", self.max_crit_chance),
            ("max_damage_reduction_rate", self.max_damage_reduction_rate),
        ] {
            if !(0..=100).contains(&value) {
                return Err(ConfigError::InvalidConstant { name, value });
            }
        }
        if self.min_hit_chance > self.max_hit_chance {
            return Err(ConfigError::InvalidConstant {
                name: "min_hit_chance",
                value: self.min_hit_chance,
            });
        }
        Ok(())
    }
}
