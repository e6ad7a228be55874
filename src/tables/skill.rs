//! Skill, buff, buff-limit and buff-link rows.

use super::sheet::SheetRow;
use super::{BuffCategory, BuffId, SkillId};
use crate::character::stats::{ElementalType, StatModifier};
use serde::{Deserialize, Serialize};

fn one() -> u32 {
    1
}

fn always() -> u32 {
    100
}

/// What a skill does. Closed set, matched exhaustively by the combat loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    Attack {
        #[serde(default = "one")]
        hits: u32,
        /// `None` attacks with the caster's element
        #[serde(default)]
        element: Option<ElementalType>,
    },
    Heal,
    Buff,
    Debuff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRule {
    Caster,
    /// First living opponent by actor id
    SingleEnemy,
    /// One living opponent chosen with a draw
    RandomEnemy,
    AllEnemies,
    /// Living ally with the lowest HP, ties by actor id
    LowestHpAlly,
    AllAllies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub id: SkillId,
    pub kind: SkillKind,
    pub target: TargetRule,
    /// Trigger chance in percent; ignored for the basic attack
    #[serde(default = "always")]
    pub chance: u32,
    /// Rounds before the skill can trigger again
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub power: i64,
    /// Percent of caster ATK added to `power`
    #[serde(default)]
    pub stat_ratio: i64,
    /// Buffs applied to every living target after the main effect
    #[serde(default)]
    pub buffs: Vec<BuffId>,
}

impl SheetRow for SkillRow {
    type Key = SkillId;
    const NAME: &'static str = "SkillSheet";

    fn key(&self) -> SkillId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffEffect {
    /// Stat modifiers layered on the holder's battle-start stats
    Stat { modifiers: Vec<StatModifier> },
    /// Damage at every round end, sized from the caster at application time
    DamageOverTime { power: i64, stat_ratio: i64 },
    /// Healing at every round end, sized from the caster at application time
    HealOverTime { power: i64, stat_ratio: i64 },
    /// Holder skips its actions
    Stun,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffRow {
    pub id: BuffId,
    pub category: BuffCategory,
    /// Duration in rounds
    pub duration: u32,
    pub effect: BuffEffect,
}

impl SheetRow for BuffRow {
    type Key = BuffId;
    const NAME: &'static str = "BuffSheet";

    fn key(&self) -> BuffId {
        self.id
    }
}

/// What happens when a category is already at its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitPolicy {
    /// The same-category instance applied first is removed
    EvictOldest,
    /// The new instance is dropped
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffLimitRow {
    pub category: BuffCategory,
    pub limit: u32,
    pub policy: LimitPolicy,
}

impl SheetRow for BuffLimitRow {
    type Key = BuffCategory;
    const NAME: &'static str = "BuffLimitSheet";

    fn key(&self) -> BuffCategory {
        self.category
    }
}

/// Bonus effect of a buff link, always aimed at the buff holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkBonus {
    Damage { power: i64, stat_ratio: i64 },
    Heal { power: i64, stat_ratio: i64 },
    ApplyBuff { buff: BuffId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffLinkRow {
    pub id: u32,
    pub first: BuffCategory,
    pub second: BuffCategory,
    #[serde(default = "always")]
    pub chance: u32,
    pub bonus: LinkBonus,
}

impl BuffLinkRow {
    /// Whether applying `applied` while `other` is active completes this link.
    pub fn links(&self, applied: BuffCategory, other: BuffCategory) -> bool {
        (self.first == applied && self.second == other)
            || (self.second == applied && self.first == other)
    }
}

impl SheetRow for BuffLinkRow {
    type Key = u32;
    const NAME: &'static str = "BuffLinkSheet";

    fn key(&self) -> u32 {
        self.id
    }
}
