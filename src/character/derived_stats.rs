//! Battle-start stat resolution for players and enemies.

use super::loadout::PlayerLoadout;
use super::stats::{StatBlock, StatModifier, StatType};
use crate::combat::skill::Skill;
use crate::combat::types::ActorId;
use crate::error::{ConfigError, InputError, SimResult};
use crate::tables::{BalanceTables, CharacterRow, WaveEnemy};

/// Stats the synergy and tower scaling percentages apply to.
const SCALED_STATS: [StatType; 3] = [StatType::Hp, StatType::Atk, StatType::Def];

/// A fully resolved participant, ready to become an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    pub actor_id: ActorId,
    pub stats: StatBlock,
    /// Basic attack first
    pub skills: Vec<Skill>,
}

impl Combatant {
    /// Resolves a player loadout against the balance tables.
    ///
    /// The weapon decides the element. Skills are the basic attack, then the
    /// character's innate skills, then equipment skills in slot order, then
    /// rune skills by rune id.
    pub fn from_loadout(loadout: &PlayerLoadout, tables: &BalanceTables) -> SimResult<Self> {
        let row = tables.characters.get(loadout.character_id)?;
        let mut base = row.stats_at(loadout.level);
        base.element = loadout.equipment.element();

        let modifiers = player_modifiers(loadout, tables)?;
        let stats = base.with_modifiers(&modifiers, &tables.constants);

        let mut skills = innate_skills(row, tables)?;
        for item in loadout.equipment.iter_equipped() {
            for granted in &item.skills {
                if granted.chance > 100 {
                    return Err(InputError::InvalidSkillChance {
                        actor: loadout.actor_id,
                        skill: granted.skill_id,
                        chance: granted.chance,
                    }
                    .into());
                }
                let skill_row = tables.skills.get(granted.skill_id)?;
                skills.push(Skill::granted(skill_row, granted));
            }
        }
        for rune in loadout.sorted_runes() {
            let option = tables.rune_options.get((rune.rune_id, rune.level))?;
            if let Some(granted) = &option.skill {
                let skill_row = tables.skills.get(granted.skill_id)?;
                skills.push(Skill::granted(skill_row, granted));
            }
        }

        let combatant = Self {
            actor_id: loadout.actor_id,
            stats,
            skills,
        };
        combatant.check_alive()?;
        Ok(combatant)
    }

    /// Resolves one wave enemy. `scale_pct` is added to HP, ATK and DEF as a
    /// percentage (tower floors); 0 leaves the row stats untouched.
    pub fn enemy(
        enemy: &WaveEnemy,
        actor_id: ActorId,
        scale_pct: i64,
        tables: &BalanceTables,
    ) -> SimResult<Self> {
        let row = tables.characters.get(enemy.character_id)?;
        let scaling: Vec<StatModifier> = if scale_pct == 0 {
            Vec::new()
        } else {
            SCALED_STATS
                .iter()
                .map(|&stat| StatModifier::percent(stat, scale_pct))
                .collect()
        };
        let stats = row
            .stats_at(enemy.level)
            .with_modifiers(&scaling, &tables.constants);

        let combatant = Self {
            actor_id,
            stats,
            skills: innate_skills(row, tables)?,
        };
        combatant.check_alive()?;
        Ok(combatant)
    }

    fn check_alive(&self) -> Result<(), InputError> {
        if self.stats.max_hp <= 0 {
            return Err(InputError::NonPositiveHp {
                actor: self.actor_id,
                hp: self.stats.max_hp,
            });
        }
        Ok(())
    }
}

/// Every stat modifier a loadout contributes at battle start.
pub fn player_modifiers(
    loadout: &PlayerLoadout,
    tables: &BalanceTables,
) -> Result<Vec<StatModifier>, ConfigError> {
    let mut modifiers = Vec::new();

    for item in loadout.equipment.iter_equipped() {
        modifiers.push(item.main_stat);
        modifiers.extend_from_slice(&item.options);
    }
    for costume in &loadout.costumes {
        modifiers.extend_from_slice(&costume.modifiers);
    }
    for consumable in &loadout.consumables {
        modifiers.extend_from_slice(&consumable.modifiers);
    }

    for rune in loadout.sorted_runes() {
        let option = tables.rune_options.get((rune.rune_id, rune.level))?;
        modifiers.extend_from_slice(&option.modifiers);
    }
    if let Some(bonus_pct) = tables.rune_level_bonus(loadout.total_rune_level()) {
        modifiers.extend(
            SCALED_STATS
                .iter()
                .map(|&stat| StatModifier::percent(stat, bonus_pct)),
        );
    }

    modifiers.extend_from_slice(&loadout.collection);
    if let Some(level) = loadout.staking_level {
        modifiers.extend_from_slice(&tables.staking_bonuses.get(level)?.modifiers);
    }

    Ok(modifiers)
}

fn innate_skills(row: &CharacterRow, tables: &BalanceTables) -> Result<Vec<Skill>, ConfigError> {
    let basic = tables.skills.get(tables.constants.basic_attack_skill_id)?;
    let mut skills = vec![Skill::from_row(basic)];
    for &id in &row.skills {
        skills.push(Skill::from_row(tables.skills.get(id)?));
    }
    Ok(skills)
}
