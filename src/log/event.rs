use crate::combat::types::{ActorId, Side};
use crate::items::RewardItem;
use crate::tables::{BuffCategory, BuffId, SkillId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoseReason {
    /// Every player-side actor died
    Defeated,
    /// The run or wave turn budget ran out
    TurnLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Lose(LoseReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageKind {
    Skill,
    Thorn,
    DamageOverTime,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealKind {
    Skill,
    HealOverTime,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffEndReason {
    Expired,
    /// Pushed out by a newer instance of a full category
    Evicted,
    /// Re-applied buff of the same id
    Replaced,
}

/// One observable occurrence. `turn` is the number of actions taken when the
/// event happened; round-end events carry the last action's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    WaveStarted {
        turn: u32,
        wave: u32,
        enemies: Vec<ActorId>,
    },
    SkillUsed {
        turn: u32,
        actor: ActorId,
        skill: SkillId,
        targets: Vec<ActorId>,
    },
    Damage {
        turn: u32,
        source: ActorId,
        target: ActorId,
        target_side: Side,
        amount: i64,
        critical: bool,
        kind: DamageKind,
        hp_after: i64,
    },
    Miss {
        turn: u32,
        source: ActorId,
        target: ActorId,
    },
    Heal {
        turn: u32,
        source: ActorId,
        target: ActorId,
        amount: i64,
        kind: HealKind,
        hp_after: i64,
    },
    BuffApplied {
        turn: u32,
        target: ActorId,
        caster: ActorId,
        buff: BuffId,
        category: BuffCategory,
    },
    BuffEnded {
        turn: u32,
        target: ActorId,
        buff: BuffId,
        category: BuffCategory,
        reason: BuffEndReason,
    },
    BuffRejected {
        turn: u32,
        target: ActorId,
        buff: BuffId,
        category: BuffCategory,
    },
    BuffLinkTriggered {
        turn: u32,
        actor: ActorId,
        link: u32,
    },
    ActionSkipped {
        turn: u32,
        actor: ActorId,
    },
    Death {
        turn: u32,
        actor: ActorId,
    },
    WaveCleared {
        turn: u32,
        wave: u32,
    },
    RewardsDrawn {
        turn: u32,
        items: Vec<RewardItem>,
    },
    BattleEnded {
        turn: u32,
        result: BattleResult,
    },
}

impl BattleEvent {
    pub fn turn(&self) -> u32 {
        match self {
            BattleEvent::WaveStarted { turn, .. }
            | BattleEvent::SkillUsed { turn, .. }
            | BattleEvent::Damage { turn, .. }
            | BattleEvent::Miss { turn, .. }
            | BattleEvent::Heal { turn, .. }
            | BattleEvent::BuffApplied { turn, .. }
            | BattleEvent::BuffEnded { turn, .. }
            | BattleEvent::BuffRejected { turn, .. }
            | BattleEvent::BuffLinkTriggered { turn, .. }
            | BattleEvent::ActionSkipped { turn, .. }
            | BattleEvent::Death { turn, .. }
            | BattleEvent::WaveCleared { turn, .. }
            | BattleEvent::RewardsDrawn { turn, .. }
            | BattleEvent::BattleEnded { turn, .. } => *turn,
        }
    }
}
