//! Resolved skills and per-action skill selection.

use crate::character::loadout::GrantedSkill;
use crate::rng::BattleRng;
use crate::tables::{BuffId, SkillId, SkillKind, SkillRow, TargetRule};
use serde::{Deserialize, Serialize};

/// A skill row with its rolled numeric payload resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub kind: SkillKind,
    pub target: TargetRule,
    pub chance: u32,
    pub cooldown: u32,
    pub power: i64,
    pub stat_ratio: i64,
    pub buffs: Vec<BuffId>,
}

impl Skill {
    pub fn from_row(row: &SkillRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            target: row.target,
            chance: row.chance,
            cooldown: row.cooldown,
            power: row.power,
            stat_ratio: row.stat_ratio,
            buffs: row.buffs.clone(),
        }
    }

    /// Gear and rune skills keep the row's shape but use the rolled chance and power.
    pub fn granted(row: &SkillRow, granted: &GrantedSkill) -> Self {
        Self {
            chance: granted.chance,
            power: granted.power,
            ..Self::from_row(row)
        }
    }
}

/// Picks the skill for one action and returns its index.
///
/// Index 0 is the basic attack and is never rolled. Every other skill that is
/// off cooldown takes one chance draw in list order. No success falls back to
/// the basic attack; several successes are settled by one draw weighted by
/// their chances.
pub fn select_skill(skills: &[Skill], cooldowns: &[u32], rng: &mut BattleRng) -> usize {
    let mut triggered = Vec::new();
    for (index, skill) in skills.iter().enumerate().skip(1) {
        if cooldowns.get(index).copied().unwrap_or(0) > 0 {
            continue;
        }
        if rng.chance(skill.chance) {
            triggered.push(index);
        }
    }

    match triggered.as_slice() {
        [] => 0,
        [only] => *only,
        many => {
            let total: i64 = many.iter().map(|&i| i64::from(skills[i].chance)).sum();
            let mut roll = rng.next_int(0, total - 1);
            for &index in many {
                let weight = i64::from(skills[index].chance);
                if roll < weight {
                    return index;
                }
                roll -= weight;
            }
            many[many.len() - 1]
        }
    }
}
