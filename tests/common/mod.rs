//! Shared fixtures for integration tests.
//!
//! The constants keep the default 100% hit chance and 0 crit, so fights
//! between the plain characters are fully predictable: the player deals 100
//! per hit and the basic enemy deals 10.

#![allow(dead_code)]

use skirmish::character::loadout::PlayerLoadout;
use skirmish::character::stats::{StatBlock, StatModifier, StatType};
use skirmish::tables::*;

pub const BASIC: u32 = 100_000;
pub const STUN_SKILL: u32 = 2;
pub const SHRED_SKILL: u32 = 3;

/// Plain player character: HP 500, ATK 100, SPD 100, basic attack only.
pub const PLAYER: u32 = 100;
/// Like [`PLAYER`] with chance-based stun and defence shred skills.
pub const SKILLED_PLAYER: u32 = 101;
/// HP 150, ATK 10, SPD 10.
pub const GRUNT: u32 = 200;
/// HP 100, ATK 10, SPD 10.
pub const IMP: u32 = 201;
/// HP 100000, ATK 10, SPD 10.
pub const BOSS: u32 = 300;

pub const CLEAR_TABLE: u32 = 1;
pub const SMALL_TABLE: u32 = 2;

fn character(id: u32, max_hp: i64, atk: i64, spd: i64, skills: Vec<u32>) -> CharacterRow {
    CharacterRow {
        id,
        stats: StatBlock {
            max_hp,
            atk,
            spd,
            ..Default::default()
        },
        growth: StatGrowth::default(),
        skills,
    }
}

fn wave(number: u32, enemies: &[u32]) -> WaveDef {
    WaveDef {
        number,
        enemies: enemies
            .iter()
            .map(|&character_id| WaveEnemy {
                character_id,
                level: 1,
            })
            .collect(),
        turn_budget: None,
        drop_table: None,
    }
}

fn skill(id: u32, kind: SkillKind, target: TargetRule, chance: u32, buffs: Vec<u32>) -> SkillRow {
    SkillRow {
        id,
        kind,
        target,
        chance,
        cooldown: 2,
        power: 0,
        stat_ratio: 100,
        buffs,
    }
}

/// Balance tables shared by every integration test.
///
/// Stages: 1 = one grunt, 2 = two imps then a grunt, 3 = the boss with a
/// 10 action budget. Floors 1 and 2 hold one imp each, +10% per floor.
/// Raid 1 is the boss with a 6 action budget.
pub fn tables() -> BalanceTables {
    let mut t = BalanceTables::default();

    t.skills
        .insert(SkillRow {
            cooldown: 0,
            ..skill(
                BASIC,
                SkillKind::Attack {
                    hits: 1,
                    element: None,
                },
                TargetRule::SingleEnemy,
                100,
                vec![],
            )
        })
        .unwrap();
    t.skills
        .insert(skill(
            STUN_SKILL,
            SkillKind::Attack {
                hits: 1,
                element: None,
            },
            TargetRule::RandomEnemy,
            20,
            vec![50],
        ))
        .unwrap();
    t.skills
        .insert(skill(
            SHRED_SKILL,
            SkillKind::Debuff,
            TargetRule::AllEnemies,
            30,
            vec![60, 61, 62],
        ))
        .unwrap();

    t.buffs
        .insert(BuffRow {
            id: 50,
            category: 5,
            duration: 1,
            effect: BuffEffect::Stun,
        })
        .unwrap();
    for id in [60, 61, 62] {
        t.buffs
            .insert(BuffRow {
                id,
                category: 6,
                duration: 3,
                effect: BuffEffect::Stat {
                    modifiers: vec![StatModifier::add(StatType::Def, -10)],
                },
            })
            .unwrap();
    }
    t.buff_limits
        .insert(BuffLimitRow {
            category: 5,
            limit: 1,
            policy: LimitPolicy::EvictOldest,
        })
        .unwrap();
    t.buff_limits
        .insert(BuffLimitRow {
            category: 6,
            limit: 2,
            policy: LimitPolicy::Reject,
        })
        .unwrap();
    t.buff_links
        .insert(BuffLinkRow {
            id: 1,
            first: 5,
            second: 6,
            chance: 50,
            bonus: LinkBonus::Damage {
                power: 25,
                stat_ratio: 0,
            },
        })
        .unwrap();

    t.characters
        .insert(character(PLAYER, 500, 100, 100, vec![]))
        .unwrap();
    t.characters
        .insert(character(
            SKILLED_PLAYER,
            500,
            100,
            100,
            vec![STUN_SKILL, SHRED_SKILL],
        ))
        .unwrap();
    t.characters.insert(character(GRUNT, 150, 10, 10, vec![])).unwrap();
    t.characters.insert(character(IMP, 100, 10, 10, vec![])).unwrap();
    t.characters
        .insert(character(BOSS, 100_000, 10, 10, vec![]))
        .unwrap();

    t.drop_tables
        .insert(DropTableRow {
            id: CLEAR_TABLE,
            min_count: 1,
            max_count: 2,
            entries: vec![
                DropEntry {
                    item_id: 8,
                    weight: 1,
                    quantity: 2,
                },
                DropEntry {
                    item_id: 7,
                    weight: 3,
                    quantity: 1,
                },
            ],
        })
        .unwrap();
    t.drop_tables
        .insert(DropTableRow {
            id: SMALL_TABLE,
            min_count: 1,
            max_count: 1,
            entries: vec![DropEntry {
                item_id: 9,
                weight: 1,
                quantity: 1,
            }],
        })
        .unwrap();

    t.stages
        .insert(StageRow {
            id: 1,
            kind: StageKind::Main,
            waves: vec![wave(1, &[GRUNT])],
            turn_budget: None,
            drop_table: Some(CLEAR_TABLE),
        })
        .unwrap();
    t.stages
        .insert(StageRow {
            id: 2,
            kind: StageKind::Main,
            waves: vec![wave(1, &[IMP, IMP]), wave(2, &[GRUNT])],
            turn_budget: None,
            drop_table: Some(CLEAR_TABLE),
        })
        .unwrap();
    t.stages
        .insert(StageRow {
            id: 3,
            kind: StageKind::Event,
            waves: vec![wave(1, &[BOSS])],
            turn_budget: Some(10),
            drop_table: Some(CLEAR_TABLE),
        })
        .unwrap();

    for floor in [1, 2] {
        let mut floor_wave = wave(1, &[IMP]);
        floor_wave.drop_table = Some(SMALL_TABLE);
        t.tower_floors
            .insert(FloorRow {
                floor,
                waves: vec![floor_wave],
                stat_growth_pct: 10,
                turn_budget: None,
                drop_table: Some(CLEAR_TABLE),
            })
            .unwrap();
    }

    t.raids
        .insert(RaidRow {
            id: 1,
            boss: WaveEnemy {
                character_id: BOSS,
                level: 1,
            },
            turn_budget: 6,
            reward_tiers: vec![
                RaidRewardTier {
                    min_score: 500,
                    drop_table: CLEAR_TABLE,
                },
                RaidRewardTier {
                    min_score: 0,
                    drop_table: SMALL_TABLE,
                },
            ],
        })
        .unwrap();

    t.validate().unwrap();
    t
}

/// A single plain player with actor id 1.
pub fn solo(character_id: u32) -> Vec<PlayerLoadout> {
    vec![PlayerLoadout::new(1, character_id, 1)]
}
