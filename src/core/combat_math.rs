//! Pure combat math shared by the combat loop and the balance tools.
//!
//! These functions never draw from the RNG; callers make the hit and crit
//! draws and pass the outcome in. Everything is integer arithmetic with
//! truncating division.

use super::balance::CombatConstants;
use crate::character::stats::{ElementalType, StatBlock};

/// Chance (percent) that an attack from `attacker` lands on `defender`.
pub fn hit_chance(attacker: &StatBlock, defender: &StatBlock, constants: &CombatConstants) -> i64 {
    constants
        .base_hit_chance
        .saturating_add(attacker.hit)
        .saturating_sub(defender.evasion)
        .clamp(constants.min_hit_chance, constants.max_hit_chance)
}

/// Effect size of a skill: `power + atk * stat_ratio / 100`, never negative.
pub fn skill_magnitude(power: i64, atk: i64, stat_ratio: i64) -> i64 {
    power
        .saturating_add(atk.saturating_mul(stat_ratio) / 100)
        .max(0)
}

/// Damage of one landed hit.
///
/// # Arguments
/// * `raw` - Skill magnitude before any defender stat is applied
/// * `element` - Element of the attack
/// * `attacker` - Current attacker stats (armor penetration, crit damage)
/// * `defender` - Current defender stats
/// * `critical` - Outcome of the crit draw
///
/// # Returns
/// Final damage: elemental percent, then defence floored at the minimum
/// damage, then crit, then flat and percent reduction floored at the minimum
/// damage, then the single-hit cap.
pub fn calculate_damage(
    raw: i64,
    element: ElementalType,
    attacker: &StatBlock,
    defender: &StatBlock,
    critical: bool,
    constants: &CombatConstants,
) -> i64 {
    let min = constants.min_damage;

    let elemental = raw.saturating_mul(element.damage_percent(defender.element, constants)) / 100;

    let defence = defender
        .def
        .saturating_sub(attacker.armor_penetration)
        .max(0);
    let mut damage = elemental.saturating_sub(defence).max(min);

    if critical {
        let percent = constants
            .base_crit_damage_percent
            .saturating_add(attacker.cri_damage);
        damage = damage.saturating_mul(percent) / 100;
    }

    damage = damage.saturating_sub(defender.damage_reduction_value);
    damage = damage.saturating_mul(100 - defender.damage_reduction_rate) / 100;
    damage = damage.max(min);

    if constants.damage_cap > 0 {
        damage = damage.min(constants.damage_cap);
    }
    damage
}

/// Damage reflected to the attacker by the defender's thorn percent.
pub fn thorn_damage(damage_taken: i64, thorn: i64) -> i64 {
    if damage_taken > 0 && thorn > 0 {
        damage_taken.saturating_mul(thorn) / 100
    } else {
        0
    }
}

/// Apply damage to HP, returning remaining HP (minimum 0).
pub fn apply_damage(current_hp: i64, damage: i64) -> i64 {
    current_hp.saturating_sub(damage.max(0)).max(0)
}

/// Apply healing to HP, returning HP capped at `max_hp`.
pub fn apply_heal(current_hp: i64, amount: i64, max_hp: i64) -> i64 {
    current_hp.saturating_add(amount.max(0)).min(max_hp)
}
