use super::buff::BuffSet;
use super::skill::Skill;
use crate::character::derived_stats::Combatant;
use crate::character::stats::StatBlock;
use crate::core::balance::CombatConstants;
use crate::core::combat_math::{apply_damage, apply_heal};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

pub type ActorId = u32;

/// Player side sorts before the enemy side on every tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// A combat participant for the duration of one run.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub side: Side,
    /// Stats at battle start; buffs are layered on top of these
    pub base: StatBlock,
    /// Current stats including active buffs
    pub stats: StatBlock,
    pub hp: i64,
    /// Basic attack first
    pub skills: Vec<Skill>,
    /// Rounds left per skill, parallel to `skills`
    pub cooldowns: Vec<u32>,
    pub buffs: BuffSet,
}

impl Actor {
    pub fn new(combatant: Combatant, side: Side) -> Self {
        let cooldowns = vec![0; combatant.skills.len()];
        Self {
            id: combatant.actor_id,
            side,
            base: combatant.stats,
            stats: combatant.stats,
            hp: combatant.stats.max_hp,
            skills: combatant.skills,
            cooldowns,
            buffs: BuffSet::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Returns HP after the hit.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        self.hp = apply_damage(self.hp, amount);
        self.hp
    }

    /// Returns HP after healing.
    pub fn heal(&mut self, amount: i64) -> i64 {
        self.hp = apply_heal(self.hp, amount, self.stats.max_hp);
        self.hp
    }

    /// Re-derives current stats from the battle-start block and active buffs.
    ///
    /// HP above a lowered max HP is clamped down; a raised max HP does not heal.
    pub fn refresh_stats(&mut self, constants: &CombatConstants) {
        self.stats = self.base.with_modifiers(self.buffs.modifiers(), constants);
        self.hp = self.hp.min(self.stats.max_hp);
    }

    pub fn start_cooldown(&mut self, skill_index: usize) {
        if let (Some(slot), Some(skill)) = (
            self.cooldowns.get_mut(skill_index),
            self.skills.get(skill_index),
        ) {
            *slot = skill.cooldown;
        }
    }

    pub fn tick_cooldowns(&mut self) {
        for c in &mut self.cooldowns {
            *c = c.saturating_sub(1);
        }
    }
}

/// Indices of living actors in acting order: SPD descending, player side
/// first, then actor id ascending.
pub fn turn_order(actors: &[Actor]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..actors.len())
        .filter(|&i| actors[i].is_alive())
        .collect();
    order.sort_by_key(|&i| (Reverse(actors[i].stats.spd), actors[i].side, actors[i].id));
    order
}

/// Indices of all actors ordered by (side, id), used for round-end processing.
pub fn resolution_order(actors: &[Actor]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..actors.len()).collect();
    order.sort_by_key(|&i| (actors[i].side, actors[i].id));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: ActorId, side: Side, spd: i64) -> Actor {
        Actor::new(
            Combatant {
                actor_id: id,
                stats: StatBlock {
                    max_hp: 100,
                    spd,
                    ..Default::default()
                },
                skills: vec![],
            },
            side,
        )
    }

    #[test]
    fn test_turn_order_speed_then_side_then_id() {
        let actors = vec![
            actor(102, Side::Enemy, 10),
            actor(2, Side::Player, 10),
            actor(101, Side::Enemy, 20),
            actor(1, Side::Player, 10),
            actor(3, Side::Player, 5),
        ];
        let ids: Vec<ActorId> = turn_order(&actors).iter().map(|&i| actors[i].id).collect();
        assert_eq!(ids, vec![101, 1, 2, 102, 3]);
    }

    #[test]
    fn test_dead_actors_do_not_act() {
        let mut actors = vec![actor(1, Side::Player, 10), actor(101, Side::Enemy, 10)];
        actors[1].take_damage(1000);
        assert_eq!(actors[1].hp, 0);
        assert_eq!(turn_order(&actors), vec![0]);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut a = actor(1, Side::Player, 10);
        a.take_damage(30);
        assert_eq!(a.heal(500), 100);
    }
}
