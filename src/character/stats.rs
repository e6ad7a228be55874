//! Stat block, stat modifiers and the modifier pipeline.
//!
//! All stat arithmetic is integer. Modifiers resolve in a fixed order:
//! additive values are summed, then percentage values are summed and applied
//! once with truncating division, then caps are enforced.

use crate::core::balance::CombatConstants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatType {
    Hp,
    Atk,
    Def,
    Spd,
    /// Critical hit chance (percent)
    Cri,
    /// Bonus critical damage (percent, added to the base crit damage)
    CriDamage,
    Hit,
    Evasion,
    ArmorPenetration,
    /// Flat damage reduction per hit
    DamageReductionValue,
    /// Percent damage reduction per hit
    DamageReductionRate,
    /// Percent of taken damage reflected to the attacker
    Thorn,
}

impl StatType {
    pub const ALL: [StatType; 12] = [
        StatType::Hp,
        StatType::Atk,
        StatType::Def,
        StatType::Spd,
        StatType::Cri,
        StatType::CriDamage,
        StatType::Hit,
        StatType::Evasion,
        StatType::ArmorPenetration,
        StatType::DamageReductionValue,
        StatType::DamageReductionRate,
        StatType::Thorn,
    ];

    pub const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierOp {
    /// Flat value added before percentages
    Add,
    /// Whole percent (10 = +10%) applied to the base plus additive total
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatType,
    pub op: ModifierOp,
    pub value: i64,
}

impl StatModifier {
    pub fn add(stat: StatType, value: i64) -> Self {
        Self {
            stat,
            op: ModifierOp::Add,
            value,
        }
    }

    pub fn percent(stat: StatType, value: i64) -> Self {
        Self {
            stat,
            op: ModifierOp::Percentage,
            value,
        }
    }
}

/// Elemental affinity of an actor or attack.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ElementalType {
    #[default]
    Normal,
    Fire,
    Water,
    Land,
    Wind,
}

impl ElementalType {
    /// The element this one deals bonus damage to.
    pub fn beats(self) -> Option<ElementalType> {
        match self {
            ElementalType::Normal => None,
            ElementalType::Fire => Some(ElementalType::Wind),
            ElementalType::Wind => Some(ElementalType::Land),
            ElementalType::Land => Some(ElementalType::Water),
            ElementalType::Water => Some(ElementalType::Fire),
        }
    }

    /// Damage percent for an attack of this element against `defender`.
    pub fn damage_percent(self, defender: ElementalType, constants: &CombatConstants) -> i64 {
        if self.beats() == Some(defender) {
            constants.elemental_advantage_percent
        } else if defender.beats() == Some(self) {
            constants.elemental_disadvantage_percent
        } else {
            100
        }
    }
}

/// Resolved stats of one actor. Current HP lives on the actor, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub max_hp: i64,
    pub atk: i64,
    pub def: i64,
    pub spd: i64,
    pub cri: i64,
    pub cri_damage: i64,
    pub hit: i64,
    pub evasion: i64,
    pub armor_penetration: i64,
    pub damage_reduction_value: i64,
    pub damage_reduction_rate: i64,
    pub thorn: i64,
    pub element: ElementalType,
}

impl StatBlock {
    pub fn get(&self, stat: StatType) -> i64 {
        match stat {
            StatType::Hp => self.max_hp,
            StatType::Atk => self.atk,
            StatType::Def => self.def,
            StatType::Spd => self.spd,
            StatType::Cri => self.cri,
            StatType::CriDamage => self.cri_damage,
            StatType::Hit => self.hit,
            StatType::Evasion => self.evasion,
            StatType::ArmorPenetration => self.armor_penetration,
            StatType::DamageReductionValue => self.damage_reduction_value,
            StatType::DamageReductionRate => self.damage_reduction_rate,
            StatType::Thorn => self.thorn,
        }
    }

    pub fn set(&mut self, stat: StatType, value: i64) {
        let slot = match stat {
            StatType::Hp => &mut self.max_hp,
            StatType::Atk => &mut self.atk,
            StatType::Def => &mut self.def,
            StatType::Spd => &mut self.spd,
            StatType::Cri => &mut self.cri,
            StatType::CriDamage => &mut self.cri_damage,
            StatType::Hit => &mut self.hit,
            StatType::Evasion => &mut self.evasion,
            StatType::ArmorPenetration => &mut self.armor_penetration,
            StatType::DamageReductionValue => &mut self.damage_reduction_value,
            StatType::DamageReductionRate => &mut self.damage_reduction_rate,
            StatType::Thorn => &mut self.thorn,
        };
        *slot = value;
    }

    /// Runs the modifier pipeline on top of this block.
    ///
    /// Used both for battle-start aggregation and for re-deriving stats
    /// whenever the set of active buffs changes.
    pub fn with_modifiers<'a, I>(&self, modifiers: I, constants: &CombatConstants) -> StatBlock
    where
        I: IntoIterator<Item = &'a StatModifier>,
    {
        let mut additive = [0i64; StatType::COUNT];
        let mut percent = [0i64; StatType::COUNT];
        for m in modifiers {
            let i = m.stat.index();
            match m.op {
                ModifierOp::Add => additive[i] = additive[i].saturating_add(m.value),
                ModifierOp::Percentage => percent[i] = percent[i].saturating_add(m.value),
            }
        }

        let mut out = *self;
        for stat in StatType::ALL {
            let i = stat.index();
            let flat = self.get(stat).saturating_add(additive[i]);
            let scaled = flat.saturating_mul(100 + percent[i].max(-100)) / 100;
            out.set(stat, scaled);
        }
        out.apply_caps(self.max_hp > 0, constants);
        out
    }

    fn apply_caps(&mut self, keep_alive: bool, constants: &CombatConstants) {
        for stat in StatType::ALL {
            if self.get(stat) < 0 {
                self.set(stat, 0);
            }
        }
        if keep_alive && self.max_hp < 1 {
            self.max_hp = 1;
        }
        self.cri = self.cri.min(constants.max_crit_chance);
        self.damage_reduction_rate = self
            .damage_reduction_rate
            .min(constants.max_damage_reduction_rate);
    }
}
