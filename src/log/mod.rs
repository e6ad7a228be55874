//! Battle events, the battle log and the run output handed back to callers.
//!
//! The log is the record callers derive every persistent effect from (stage
//! cleared, arena score, raid score, rewards), so it carries the cleared and
//! total wave counts alongside the ordered events.

pub mod event;

pub use event::*;

use crate::combat::types::{ActorId, Side};
use crate::items::{merge_rewards, RewardItem};
use crate::tables::BuffId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    pub events: Vec<BattleEvent>,
    pub result: BattleResult,
    /// Number of the last wave cleared, 0 if none
    pub cleared_wave_number: u32,
    pub wave_count: u32,
    /// Actions taken, including skipped ones
    pub turns: u32,
}

impl BattleLog {
    pub fn is_win(&self) -> bool {
        self.result == BattleResult::Win
    }

    /// Total damage landed on actors of `side`.
    pub fn damage_dealt_to(&self, side: Side) -> i64 {
        self.events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::Damage {
                    target_side,
                    amount,
                    ..
                } if *target_side == side => Some(*amount),
                _ => None,
            })
            .fold(0i64, |acc, amount| acc.saturating_add(amount))
    }

    /// Total damage landed on one actor.
    pub fn damage_dealt_to_actor(&self, actor: ActorId) -> i64 {
        self.events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::Damage { target, amount, .. } if *target == actor => Some(*amount),
                _ => None,
            })
            .fold(0i64, |acc, amount| acc.saturating_add(amount))
    }

    /// Canonical binary encoding, identical on every node for the same run.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Plain data with derived Serialize; encoding into a Vec cannot fail.
        bincode::serialize(self).unwrap_or_default()
    }

    /// SHA-256 of [`Self::to_bytes`], lowercase hex.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(self.to_bytes());
        hash.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Final state of one player-side actor, for the caller to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorState {
    pub id: ActorId,
    pub hp: i64,
    pub max_hp: i64,
    pub buffs: Vec<BuffId>,
}

/// Everything one run hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutput {
    pub log: BattleLog,
    /// Ascending by item id
    pub rewards: Vec<RewardItem>,
    pub players: Vec<ActorState>,
}

impl BattleOutput {
    /// Records a batch drawn after the run by a mode front end.
    pub fn record_rewards(&mut self, items: Vec<RewardItem>) {
        let turn = self.log.turns;
        self.rewards = merge_rewards(self.rewards.iter().copied().chain(items.iter().copied()));
        self.log.events.push(BattleEvent::RewardsDrawn { turn, items });
    }
}
