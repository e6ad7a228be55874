//! Immutable balance tables injected into every simulation.
//!
//! Tables are parsed once (usually from JSON), validated once with
//! [`BalanceTables::validate`], and then shared read-only by any number of
//! concurrent runs. The simulator never mutates them.

pub mod character;
pub mod drop;
pub mod rune;
pub mod sheet;
pub mod skill;
pub mod stage;

pub use character::*;
pub use drop::*;
pub use rune::*;
pub use sheet::*;
pub use skill::*;
pub use stage::*;

use crate::core::balance::CombatConstants;
use crate::error::{ConfigError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type SkillId = u32;
pub type BuffId = u32;
pub type BuffCategory = u32;
pub type ItemId = u32;
pub type DropTableId = u32;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceTables {
    pub constants: CombatConstants,
    pub characters: Sheet<CharacterRow>,
    pub skills: Sheet<SkillRow>,
    pub buffs: Sheet<BuffRow>,
    pub buff_limits: Sheet<BuffLimitRow>,
    pub buff_links: Sheet<BuffLinkRow>,
    pub stages: Sheet<StageRow>,
    pub tower_floors: Sheet<FloorRow>,
    pub raids: Sheet<RaidRow>,
    pub drop_tables: Sheet<DropTableRow>,
    pub rune_options: Sheet<RuneOptionRow>,
    pub rune_level_bonuses: Sheet<RuneLevelBonusRow>,
    pub staking_bonuses: Sheet<StakingBonusRow>,
}

impl BalanceTables {
    /// Parses and validates tables from a JSON document.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let tables: BalanceTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Synergy percent for a summed rune level: the highest threshold reached.
    pub fn rune_level_bonus(&self, total_level: u32) -> Option<i64> {
        self.rune_level_bonuses
            .iter()
            .filter(|row| row.threshold <= total_level)
            .last()
            .map(|row| row.bonus_pct)
    }

    /// Cross-checks every reference between sheets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()?;
        self.skills.get(self.constants.basic_attack_skill_id)?;

        for skill in self.skills.iter() {
            check_chance(format!("skill {}", skill.id), skill.chance)?;
            for &buff in &skill.buffs {
                self.buffs.get(buff)?;
            }
        }

        for buff in self.buffs.iter() {
            if !self.buff_limits.contains(buff.category) {
                return Err(ConfigError::MissingBuffLimit {
                    buff: buff.id,
                    category: buff.category,
                });
            }
        }

        for link in self.buff_links.iter() {
            check_chance(format!("buff link {}", link.id), link.chance)?;
            if let LinkBonus::ApplyBuff { buff } = link.bonus {
                self.buffs.get(buff)?;
            }
        }

        for character in self.characters.iter() {
            for &skill in &character.skills {
                self.skills.get(skill)?;
            }
        }

        for stage in self.stages.iter() {
            let owner = format!("stage {}", stage.id);
            check_budget(&owner, stage.turn_budget)?;
            self.validate_waves(&owner, &stage.waves)?;
            if let Some(table) = stage.drop_table {
                self.drop_tables.get(table)?;
            }
        }

        for floor in self.tower_floors.iter() {
            let owner = format!("tower floor {}", floor.floor);
            check_budget(&owner, floor.turn_budget)?;
            self.validate_waves(&owner, &floor.waves)?;
            if let Some(table) = floor.drop_table {
                self.drop_tables.get(table)?;
            }
        }

        for raid in self.raids.iter() {
            let owner = format!("raid {}", raid.id);
            check_budget(&owner, Some(raid.turn_budget))?;
            self.characters.get(raid.boss.character_id)?;
            for tier in &raid.reward_tiers {
                self.drop_tables.get(tier.drop_table)?;
            }
        }

        for table in self.drop_tables.iter() {
            table.validate()?;
        }

        for option in self.rune_options.iter() {
            if let Some(granted) = &option.skill {
                check_chance(
                    format!("rune {} level {}", option.rune_id, option.level),
                    granted.chance,
                )?;
                self.skills.get(granted.skill_id)?;
            }
        }

        Ok(())
    }

    fn validate_waves(&self, owner: &str, waves: &[WaveDef]) -> Result<(), ConfigError> {
        if waves.is_empty() {
            return Err(ConfigError::NoWaves {
                owner: owner.to_string(),
            });
        }
        for (index, wave) in waves.iter().enumerate() {
            let expected = index as u32 + 1;
            if wave.number != expected {
                return Err(ConfigError::WaveOrder {
                    owner: owner.to_string(),
                    expected,
                    found: wave.number,
                });
            }
            if wave.enemies.is_empty() {
                return Err(ConfigError::EmptyWave {
                    owner: owner.to_string(),
                    wave: wave.number,
                });
            }
            check_budget(&format!("{owner} wave {}", wave.number), wave.turn_budget)?;
            for enemy in &wave.enemies {
                self.characters.get(enemy.character_id)?;
            }
            if let Some(table) = wave.drop_table {
                self.drop_tables.get(table)?;
            }
        }
        Ok(())
    }
}

fn check_chance(owner: String, chance: u32) -> Result<(), ConfigError> {
    if chance > 100 {
        return Err(ConfigError::InvalidChance { owner, chance });
    }
    Ok(())
}

fn check_budget(owner: &str, budget: Option<u32>) -> Result<(), ConfigError> {
    if budget == Some(0) {
        return Err(ConfigError::InvalidTurnBudget {
            owner: owner.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::loadout::GrantedSkill;
    use crate::character::stats::StatBlock;

    fn minimal() -> BalanceTables {
        let mut tables = BalanceTables::default();
        tables
            .skills
            .insert(SkillRow {
                id: tables.constants.basic_attack_skill_id,
                kind: SkillKind::Attack {
                    hits: 1,
                    element: None,
                },
                target: TargetRule::SingleEnemy,
                chance: 100,
                cooldown: 0,
                power: 0,
                stat_ratio: 100,
                buffs: vec![],
            })
            .unwrap();
        tables
            .characters
            .insert(CharacterRow {
                id: 200,
                stats: StatBlock {
                    max_hp: 100,
                    atk: 10,
                    ..Default::default()
                },
                growth: StatGrowth::default(),
                skills: vec![],
            })
            .unwrap();
        tables
    }

    #[test]
    fn test_minimal_tables_validate() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_missing_basic_attack_fails_fast() {
        let tables = BalanceTables::default();
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::MissingRow {
                table: "SkillSheet",
                ..
            })
        ));
    }

    #[test]
    fn test_buff_without_limit_row_fails() {
        let mut tables = minimal();
        tables
            .buffs
            .insert(BuffRow {
                id: 1,
                category: 42,
                duration: 2,
                effect: BuffEffect::Stun,
            })
            .unwrap();
        assert_eq!(
            tables.validate(),
            Err(ConfigError::MissingBuffLimit {
                buff: 1,
                category: 42
            })
        );
    }

    #[test]
    fn test_empty_wave_fails() {
        let mut tables = minimal();
        tables
            .stages
            .insert(StageRow {
                id: 1,
                kind: StageKind::Main,
                waves: vec![WaveDef {
                    number: 1,
                    enemies: vec![],
                    turn_budget: None,
                    drop_table: None,
                }],
                turn_budget: None,
                drop_table: None,
            })
            .unwrap();
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::EmptyWave { wave: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_enemy_fails() {
        let mut tables = minimal();
        tables
            .stages
            .insert(StageRow {
                id: 1,
                kind: StageKind::Main,
                waves: vec![WaveDef {
                    number: 1,
                    enemies: vec![WaveEnemy {
                        character_id: 999,
                        level: 1,
                    }],
                    turn_budget: None,
                    drop_table: None,
                }],
                turn_budget: None,
                drop_table: None,
            })
            .unwrap();
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::MissingRow {
                table: "CharacterSheet",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_hit_range_fails_fast() {
        let mut tables = minimal();
        tables.constants.min_hit_chance = 90;
        tables.constants.max_hit_chance = 50;
        assert_eq!(
            tables.validate(),
            Err(ConfigError::InvalidConstant {
                name: "min_hit_chance",
                value: 90
            })
        );
    }

    #[test]
    fn test_rune_skill_chance_over_100_fails() {
        let mut tables = minimal();
        tables
            .rune_options
            .insert(RuneOptionRow {
                rune_id: 3,
                level: 1,
                modifiers: vec![],
                skill: Some(GrantedSkill {
                    skill_id: tables.constants.basic_attack_skill_id,
                    chance: 150,
                    power: 0,
                }),
            })
            .unwrap();
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::InvalidChance { chance: 150, .. })
        ));
    }

    #[test]
    fn test_rune_level_bonus_picks_highest_reached() {
        let mut tables = minimal();
        for (threshold, bonus_pct) in [(10, 1), (30, 3), (20, 2)] {
            tables
                .rune_level_bonuses
                .insert(RuneLevelBonusRow {
                    threshold,
                    bonus_pct,
                })
                .unwrap();
        }
        assert_eq!(tables.rune_level_bonus(5), None);
        assert_eq!(tables.rune_level_bonus(10), Some(1));
        assert_eq!(tables.rune_level_bonus(29), Some(2));
        assert_eq!(tables.rune_level_bonus(100), Some(3));
    }
}
