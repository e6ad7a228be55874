//! Active buff instances and per-category limits.

use super::types::ActorId;
use crate::character::stats::StatModifier;
use crate::log::BuffEndReason;
use crate::tables::{BuffCategory, BuffEffect, BuffId, BuffLimitRow, LimitPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffInstance {
    pub buff_id: BuffId,
    pub category: BuffCategory,
    pub caster: ActorId,
    /// Rounds left, counted down at round end
    pub remaining: u32,
    /// Set once the holder starts a turn while holding this instance.
    /// Only counting instances tick down.
    #[serde(default)]
    pub counting: bool,
    /// Application order within the battle
    pub seq: u64,
    pub effect: BuffEffect,
    /// Per-round damage or healing, sized when the buff was applied
    pub tick_amount: i64,
}

impl BuffInstance {
    pub fn is_stat(&self) -> bool {
        matches!(self.effect, BuffEffect::Stat { .. })
    }
}

/// Result of offering a new instance to a [`BuffSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Applied; `ended` is the instance it displaced, if any.
    Applied {
        ended: Option<(BuffInstance, BuffEndReason)>,
    },
    Rejected,
}

/// Buffs held by one actor, kept in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffSet {
    instances: Vec<BuffInstance>,
}

impl BuffSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuffInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn count_in(&self, category: BuffCategory) -> usize {
        self.instances
            .iter()
            .filter(|b| b.category == category)
            .count()
    }

    pub fn ids(&self) -> Vec<BuffId> {
        self.instances.iter().map(|b| b.buff_id).collect()
    }

    pub fn is_stunned(&self) -> bool {
        self.instances
            .iter()
            .any(|b| matches!(b.effect, BuffEffect::Stun))
    }

    /// Stat modifiers of every active stat buff, in application order.
    pub fn modifiers(&self) -> impl Iterator<Item = &StatModifier> {
        self.instances.iter().flat_map(|b| match &b.effect {
            BuffEffect::Stat { modifiers } => modifiers.as_slice(),
            _ => &[],
        })
    }

    /// Active categories other than the instance `except_seq`, ascending.
    pub fn categories_besides(&self, except_seq: u64) -> Vec<BuffCategory> {
        let mut categories: Vec<BuffCategory> = self
            .instances
            .iter()
            .filter(|b| b.seq != except_seq)
            .map(|b| b.category)
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Adds `instance` under the category limit.
    ///
    /// An instance of the same buff is replaced in place of the limit check.
    /// Otherwise a full category evicts its lowest-sequence instance or
    /// rejects the newcomer, per the limit policy.
    pub fn apply(&mut self, instance: BuffInstance, limit: &BuffLimitRow) -> ApplyOutcome {
        if let Some(pos) = self
            .instances
            .iter()
            .position(|b| b.buff_id == instance.buff_id)
        {
            let old = self.instances.remove(pos);
            self.instances.push(instance);
            return ApplyOutcome::Applied {
                ended: Some((old, BuffEndReason::Replaced)),
            };
        }

        let limit_count = limit.limit as usize;
        if self.count_in(instance.category) < limit_count {
            self.instances.push(instance);
            return ApplyOutcome::Applied { ended: None };
        }

        match limit.policy {
            LimitPolicy::Reject => ApplyOutcome::Rejected,
            LimitPolicy::EvictOldest => {
                let oldest = self
                    .instances
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.category == instance.category)
                    .min_by_key(|(_, b)| b.seq)
                    .map(|(pos, _)| pos);
                match oldest {
                    Some(pos) => {
                        let old = self.instances.remove(pos);
                        self.instances.push(instance);
                        ApplyOutcome::Applied {
                            ended: Some((old, BuffEndReason::Evicted)),
                        }
                    }
                    // limit of zero: nothing to evict
                    None => ApplyOutcome::Rejected,
                }
            }
        }
    }

    /// Called when the holder's turn comes up, acted or skipped.
    pub fn start_counting(&mut self) {
        for b in &mut self.instances {
            b.counting = true;
        }
    }

    /// Counts every counting instance down by one round and removes the
    /// expired ones. Instances gained after the holder's turn this round are
    /// left untouched.
    ///
    /// Expired instances are returned in application order.
    pub fn tick(&mut self) -> Vec<BuffInstance> {
        for b in self.instances.iter_mut().filter(|b| b.counting) {
            b.remaining = b.remaining.saturating_sub(1);
        }
        let (expired, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.instances)
            .into_iter()
            .partition(|b| b.counting && b.remaining == 0);
        self.instances = active;
        expired
    }
}
