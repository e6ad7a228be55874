use super::sheet::SheetRow;
use super::SkillId;
use crate::character::stats::StatBlock;
use serde::{Deserialize, Serialize};

/// Per-level stat growth of a character row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatGrowth {
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub spd: i64,
    pub cri: i64,
    pub hit: i64,
    pub evasion: i64,
}

/// Base stats shared by player characters and enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRow {
    pub id: u32,
    /// Level 1 stats, including the innate element
    pub stats: StatBlock,
    #[serde(default)]
    pub growth: StatGrowth,
    /// Skills the character always has besides the basic attack
    #[serde(default)]
    pub skills: Vec<SkillId>,
}

impl CharacterRow {
    /// `base + growth * (level - 1)`; level 0 is treated as level 1.
    pub fn stats_at(&self, level: u32) -> StatBlock {
        let steps = i64::from(level.max(1) - 1);
        let g = &self.growth;
        let mut stats = self.stats;
        let grow = |base: i64, per_level: i64| base.saturating_add(per_level.saturating_mul(steps));
        stats.max_hp = grow(stats.max_hp, g.hp);
        stats.atk = grow(stats.atk, g.atk);
        stats.def = grow(stats.def, g.def);
        stats.spd = grow(stats.spd, g.spd);
        stats.cri = grow(stats.cri, g.cri);
        stats.hit = grow(stats.hit, g.hit);
        stats.evasion = grow(stats.evasion, g.evasion);
        stats
    }
}

impl SheetRow for CharacterRow {
    type Key = u32;
    const NAME: &'static str = "CharacterSheet";

    fn key(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_at_level_applies_growth() {
        let row = CharacterRow {
            id: 1,
            stats: StatBlock {
                max_hp: 300,
                atk: 20,
                def: 5,
                spd: 100,
                ..Default::default()
            },
            growth: StatGrowth {
                hp: 30,
                atk: 2,
                ..Default::default()
            },
            skills: vec![],
        };
        assert_eq!(row.stats_at(1).max_hp, 300);
        assert_eq!(row.stats_at(0).max_hp, 300);
        let lv10 = row.stats_at(10);
        assert_eq!(lv10.max_hp, 570);
        assert_eq!(lv10.atk, 38);
        assert_eq!(lv10.def, 5);
    }

    #[test]
    fn test_stats_at_saturates_extreme_growth() {
        let row = CharacterRow {
            id: 1,
            stats: StatBlock {
                max_hp: 300,
                ..Default::default()
            },
            growth: StatGrowth {
                hp: i64::MAX,
                atk: i64::MIN,
                ..Default::default()
            },
            skills: vec![],
        };
        let stats = row.stats_at(u32::MAX);
        assert_eq!(stats.max_hp, i64::MAX);
        assert_eq!(stats.atk, i64::MIN);
    }
}
