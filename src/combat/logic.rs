//! The combat loop.
//!
//! One [`Simulator`] runs one battle: a straight-line, single-threaded pass
//! over rounds of actions until a side is wiped or a turn budget runs out.
//! Every random decision draws from the caller's [`BattleRng`] in a fixed
//! order, and every collection that feeds a draw is iterated in a total order
//! (turn queue, actor id, buff sequence, link id), so the same input always
//! yields the same log.

use super::buff::{ApplyOutcome, BuffInstance};
use super::skill::{select_skill, Skill};
use super::types::{resolution_order, turn_order, Actor, ActorId, Side};
use crate::character::derived_stats::Combatant;
use crate::character::stats::ElementalType;
use crate::core::combat_math::{calculate_damage, hit_chance, skill_magnitude, thorn_damage};
use crate::error::{ConfigError, InputError, SimResult};
use crate::items::{draw_rewards, merge_rewards, RewardItem};
use crate::log::{
    ActorState, BattleEvent, BattleLog, BattleOutput, BattleResult, BuffEndReason, DamageKind,
    HealKind, LoseReason,
};
use crate::rng::BattleRng;
use crate::tables::{
    BalanceTables, BuffEffect, BuffId, DropTableId, LinkBonus, SkillKind, SkillRow, SheetRow,
    TargetRule, WaveDef,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Enemy actor ids are `wave number * ENEMY_ID_STRIDE + slot`.
pub const ENEMY_ID_STRIDE: u32 = 100;

/// One wave of resolved enemies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    pub number: u32,
    pub enemies: Vec<Combatant>,
    pub turn_budget: Option<u32>,
    pub drop_table: Option<DropTableId>,
}

impl Wave {
    /// Resolves a table wave; `scale_pct` is forwarded to every enemy.
    pub fn from_def(def: &WaveDef, scale_pct: i64, tables: &BalanceTables) -> SimResult<Self> {
        let mut enemies = Vec::with_capacity(def.enemies.len());
        for (slot, enemy) in def.enemies.iter().enumerate() {
            let actor_id = enemy_actor_id(def.number, slot)?;
            enemies.push(Combatant::enemy(enemy, actor_id, scale_pct, tables)?);
        }
        Ok(Self {
            number: def.number,
            enemies,
            turn_budget: def.turn_budget,
            drop_table: def.drop_table,
        })
    }
}

/// `wave * ENEMY_ID_STRIDE + slot`, rejected when it does not fit in a `u32`.
pub fn enemy_actor_id(wave: u32, slot: usize) -> Result<ActorId, ConfigError> {
    u32::try_from(slot)
        .ok()
        .and_then(|slot| wave.checked_mul(ENEMY_ID_STRIDE)?.checked_add(slot))
        .ok_or(ConfigError::ActorIdOverflow { wave, slot })
}

pub fn resolve_waves(
    defs: &[WaveDef],
    scale_pct: i64,
    tables: &BalanceTables,
) -> SimResult<Vec<Wave>> {
    defs.iter()
        .map(|def| Wave::from_def(def, scale_pct, tables))
        .collect()
}

/// Where reward draws sit in the RNG stream relative to combat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardPlan {
    #[default]
    None,
    /// Drawn before the first wave starts
    Upfront(DropTableId),
    /// Drawn after the battle ends, on a win only
    OnClear(DropTableId),
    /// Drawn right after each cleared wave that names a drop table
    PerWave,
}

/// Canonical simulator input, whatever mode produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorInput {
    pub players: Vec<Combatant>,
    pub waves: Vec<Wave>,
    /// Run-wide action budget
    pub turn_budget: u32,
    pub rewards: RewardPlan,
}

enum SideCheck {
    Ongoing,
    NextWave,
    Ended(BattleResult),
}

pub struct Simulator<'a> {
    tables: &'a BalanceTables,
    rng: &'a mut BattleRng,
    actors: Vec<Actor>,
    waves: Vec<Wave>,
    wave_index: usize,
    turn_budget: u32,
    reward_plan: RewardPlan,
    events: Vec<BattleEvent>,
    rewards: Vec<RewardItem>,
    turns: u32,
    wave_turns: u32,
    cleared_wave_number: u32,
    next_seq: u64,
}

impl<'a> Simulator<'a> {
    /// Checks the input and sets up the player side.
    ///
    /// Nothing is drawn from `rng` until [`Simulator::simulate`] runs.
    pub fn new(
        input: SimulatorInput,
        tables: &'a BalanceTables,
        rng: &'a mut BattleRng,
    ) -> SimResult<Self> {
        validate_input(&input, tables)?;
        let actors = input
            .players
            .into_iter()
            .map(|c| Actor::new(c, Side::Player))
            .collect();
        Ok(Self {
            tables,
            rng,
            actors,
            waves: input.waves,
            wave_index: 0,
            turn_budget: input.turn_budget,
            reward_plan: input.rewards,
            events: Vec::new(),
            rewards: Vec::new(),
            turns: 0,
            wave_turns: 0,
            cleared_wave_number: 0,
            next_seq: 0,
        })
    }

    /// Runs the battle to completion.
    pub fn simulate(mut self) -> SimResult<BattleOutput> {
        let wave_count = self.waves.len() as u32;
        debug!(
            players = self.actors.len(),
            waves = wave_count,
            turn_budget = self.turn_budget,
            "battle started"
        );

        if let RewardPlan::Upfront(table) = self.reward_plan {
            self.draw_batch(table)?;
        }
        self.start_wave(0);

        let result = loop {
            if let Some(result) = self.run_round()? {
                break result;
            }
            if let Some(result) = self.end_round()? {
                break result;
            }
        };

        self.events.push(BattleEvent::BattleEnded {
            turn: self.turns,
            result,
        });
        if result == BattleResult::Win {
            if let RewardPlan::OnClear(table) = self.reward_plan {
                self.draw_batch(table)?;
            }
        }
        debug!(
            ?result,
            turns = self.turns,
            cleared = self.cleared_wave_number,
            "battle ended"
        );

        let mut players: Vec<ActorState> = self
            .actors
            .iter()
            .filter(|a| a.side == Side::Player)
            .map(|a| ActorState {
                id: a.id,
                hp: a.hp,
                max_hp: a.stats.max_hp,
                buffs: a.buffs.ids(),
            })
            .collect();
        players.sort_by_key(|p| p.id);

        Ok(BattleOutput {
            log: BattleLog {
                events: self.events,
                result,
                cleared_wave_number: self.cleared_wave_number,
                wave_count,
                turns: self.turns,
            },
            rewards: merge_rewards(self.rewards),
            players,
        })
    }

    /// One pass over the turn queue. A cleared wave abandons the rest of the
    /// queue; the new wave acts from the next round on.
    fn run_round(&mut self) -> SimResult<Option<BattleResult>> {
        for idx in turn_order(&self.actors) {
            if !self.actors[idx].is_alive() {
                continue;
            }
            if self.budget_exhausted() {
                return Ok(Some(BattleResult::Lose(LoseReason::TurnLimit)));
            }
            self.turns += 1;
            self.wave_turns += 1;
            self.actors[idx].buffs.start_counting();
            self.take_action(idx)?;

            match self.check_sides()? {
                SideCheck::Ongoing => {}
                SideCheck::NextWave => break,
                SideCheck::Ended(result) => return Ok(Some(result)),
            }
        }
        Ok(None)
    }

    /// Round end in (side, id) order: over-time ticks, duration countdown,
    /// expiry and cooldowns, then the death and wave checks. Durations only
    /// count down once the holder has had a turn while holding the buff.
    fn end_round(&mut self) -> SimResult<Option<BattleResult>> {
        let tables = self.tables;
        for idx in resolution_order(&self.actors) {
            if !self.actors[idx].is_alive() {
                continue;
            }
            self.tick_over_time(idx);
            if !self.actors[idx].is_alive() {
                continue;
            }

            let expired = self.actors[idx].buffs.tick();
            let target = self.actors[idx].id;
            for b in &expired {
                self.events.push(BattleEvent::BuffEnded {
                    turn: self.turns,
                    target,
                    buff: b.buff_id,
                    category: b.category,
                    reason: BuffEndReason::Expired,
                });
            }
            if expired.iter().any(BuffInstance::is_stat) {
                self.actors[idx].refresh_stats(&tables.constants);
            }
            self.actors[idx].tick_cooldowns();
        }

        match self.check_sides()? {
            SideCheck::Ended(result) => Ok(Some(result)),
            SideCheck::Ongoing | SideCheck::NextWave => Ok(None),
        }
    }

    fn tick_over_time(&mut self, idx: usize) {
        let ticks: Vec<(ActorId, bool, i64)> = self.actors[idx]
            .buffs
            .iter()
            .filter_map(|b| match b.effect {
                BuffEffect::DamageOverTime { .. } => Some((b.caster, true, b.tick_amount)),
                BuffEffect::HealOverTime { .. } => Some((b.caster, false, b.tick_amount)),
                _ => None,
            })
            .collect();
        for (caster, is_damage, amount) in ticks {
            if !self.actors[idx].is_alive() {
                break;
            }
            if is_damage {
                self.deal_damage(caster, idx, amount, false, DamageKind::DamageOverTime);
            } else {
                self.heal_actor(caster, idx, amount, HealKind::HealOverTime);
            }
        }
    }

    fn budget_exhausted(&self) -> bool {
        if self.turns >= self.turn_budget {
            return true;
        }
        match self.waves.get(self.wave_index).and_then(|w| w.turn_budget) {
            Some(budget) => self.wave_turns >= budget,
            None => false,
        }
    }

    fn side_alive(&self, side: Side) -> bool {
        self.actors
            .iter()
            .any(|a| a.side == side && a.is_alive())
    }

    /// A wiped player side loses even if the last enemy fell in the same action.
    fn check_sides(&mut self) -> SimResult<SideCheck> {
        if !self.side_alive(Side::Player) {
            return Ok(SideCheck::Ended(BattleResult::Lose(LoseReason::Defeated)));
        }
        if self.side_alive(Side::Enemy) {
            return Ok(SideCheck::Ongoing);
        }

        let (number, drop_table) = match self.waves.get(self.wave_index) {
            Some(wave) => (wave.number, wave.drop_table),
            None => return Ok(SideCheck::Ended(BattleResult::Win)),
        };
        self.cleared_wave_number = number;
        self.events.push(BattleEvent::WaveCleared {
            turn: self.turns,
            wave: number,
        });
        debug!(wave = number, turns = self.turns, "wave cleared");

        if self.reward_plan == RewardPlan::PerWave {
            if let Some(table) = drop_table {
                self.draw_batch(table)?;
            }
        }

        if self.wave_index + 1 >= self.waves.len() {
            return Ok(SideCheck::Ended(BattleResult::Win));
        }
        self.start_wave(self.wave_index + 1);
        Ok(SideCheck::NextWave)
    }

    /// Replaces the enemy side. Player HP, buffs and cooldowns carry over.
    fn start_wave(&mut self, index: usize) {
        let Some(wave) = self.waves.get(index) else {
            return;
        };
        self.wave_index = index;
        self.wave_turns = 0;
        self.actors.retain(|a| a.side == Side::Player);
        let enemies: Vec<ActorId> = wave.enemies.iter().map(|c| c.actor_id).collect();
        let number = wave.number;
        self.actors.extend(
            wave.enemies
                .iter()
                .cloned()
                .map(|c| Actor::new(c, Side::Enemy)),
        );
        debug!(wave = number, enemies = enemies.len(), "wave started");
        self.events.push(BattleEvent::WaveStarted {
            turn: self.turns,
            wave: number,
            enemies,
        });
    }

    fn draw_batch(&mut self, table: DropTableId) -> SimResult<()> {
        let row = self.tables.drop_tables.get(table)?;
        let items = draw_rewards(row, self.rng);
        self.rewards.extend_from_slice(&items);
        self.events.push(BattleEvent::RewardsDrawn {
            turn: self.turns,
            items,
        });
        Ok(())
    }

    fn take_action(&mut self, idx: usize) -> SimResult<()> {
        let actor_id = self.actors[idx].id;
        if self.actors[idx].buffs.is_stunned() {
            trace!(actor = actor_id, turn = self.turns, "stunned");
            self.events.push(BattleEvent::ActionSkipped {
                turn: self.turns,
                actor: actor_id,
            });
            return Ok(());
        }

        let skill_index = select_skill(
            &self.actors[idx].skills,
            &self.actors[idx].cooldowns,
            self.rng,
        );
        let skill: Skill = match self.actors[idx].skills.get(skill_index) {
            Some(skill) => skill.clone(),
            None => {
                return Err(ConfigError::MissingRow {
                    table: SkillRow::NAME,
                    key: format!("{:?}", self.tables.constants.basic_attack_skill_id),
                }
                .into())
            }
        };
        self.actors[idx].start_cooldown(skill_index);

        let targets = self.select_targets(idx, skill.target);
        let target_ids: Vec<ActorId> = targets.iter().map(|&t| self.actors[t].id).collect();
        trace!(
            actor = actor_id,
            skill = skill.id,
            targets = ?target_ids,
            turn = self.turns,
            "action"
        );
        self.events.push(BattleEvent::SkillUsed {
            turn: self.turns,
            actor: actor_id,
            skill: skill.id,
            targets: target_ids,
        });

        match skill.kind {
            SkillKind::Attack { hits, element } => {
                self.resolve_attack(idx, &skill, hits, element, &targets)
            }
            SkillKind::Heal => {
                let amount =
                    skill_magnitude(skill.power, self.actors[idx].stats.atk, skill.stat_ratio);
                for &t in &targets {
                    if self.actors[t].is_alive() {
                        self.heal_actor(actor_id, t, amount, HealKind::Skill);
                    }
                }
            }
            SkillKind::Buff | SkillKind::Debuff => {}
        }

        for &t in &targets {
            for &buff in &skill.buffs {
                if self.actors[t].is_alive() {
                    self.apply_buff(idx, t, buff, true)?;
                }
            }
        }
        Ok(())
    }

    /// Living actors of `side` ordered by actor id.
    fn living(&self, side: Side) -> Vec<usize> {
        let mut found: Vec<usize> = (0..self.actors.len())
            .filter(|&i| self.actors[i].side == side && self.actors[i].is_alive())
            .collect();
        found.sort_by_key(|&i| self.actors[i].id);
        found
    }

    fn select_targets(&mut self, idx: usize, rule: TargetRule) -> Vec<usize> {
        let side = self.actors[idx].side;
        match rule {
            TargetRule::Caster => vec![idx],
            TargetRule::SingleEnemy => self.living(side.opponent()).into_iter().take(1).collect(),
            TargetRule::RandomEnemy => {
                let opponents = self.living(side.opponent());
                if opponents.is_empty() {
                    return opponents;
                }
                let pick = self.rng.next_int(0, opponents.len() as i64 - 1) as usize;
                opponents.get(pick).copied().into_iter().collect()
            }
            TargetRule::AllEnemies => self.living(side.opponent()),
            TargetRule::LowestHpAlly => self
                .living(side)
                .into_iter()
                .min_by_key(|&i| (self.actors[i].hp, self.actors[i].id))
                .into_iter()
                .collect(),
            TargetRule::AllAllies => self.living(side),
        }
    }

    fn resolve_attack(
        &mut self,
        idx: usize,
        skill: &Skill,
        hits: u32,
        element: Option<ElementalType>,
        targets: &[usize],
    ) {
        let tables = self.tables;
        let constants = &tables.constants;
        let attacker_id = self.actors[idx].id;
        for &t in targets {
            for _ in 0..hits {
                if !self.actors[t].is_alive() || !self.actors[idx].is_alive() {
                    break;
                }
                let attacker = self.actors[idx].stats;
                let defender = self.actors[t].stats;
                let target_id = self.actors[t].id;

                let chance = hit_chance(&attacker, &defender, constants);
                if !self.rng.chance(as_percent(chance)) {
                    self.events.push(BattleEvent::Miss {
                        turn: self.turns,
                        source: attacker_id,
                        target: target_id,
                    });
                    continue;
                }
                let critical = self.rng.chance(as_percent(attacker.cri));

                let raw = skill_magnitude(skill.power, attacker.atk, skill.stat_ratio);
                let element = element.unwrap_or(attacker.element);
                let damage =
                    calculate_damage(raw, element, &attacker, &defender, critical, constants);
                self.deal_damage(attacker_id, t, damage, critical, DamageKind::Skill);

                let reflected = thorn_damage(damage, defender.thorn);
                if reflected > 0 && self.actors[idx].is_alive() {
                    self.deal_damage(target_id, idx, reflected, false, DamageKind::Thorn);
                }
            }
        }
    }

    fn deal_damage(
        &mut self,
        source: ActorId,
        target_idx: usize,
        amount: i64,
        critical: bool,
        kind: DamageKind,
    ) {
        let turn = self.turns;
        let target = &mut self.actors[target_idx];
        let was_alive = target.is_alive();
        let hp_after = target.take_damage(amount);
        let (target_id, target_side) = (target.id, target.side);
        self.events.push(BattleEvent::Damage {
            turn,
            source,
            target: target_id,
            target_side,
            amount,
            critical,
            kind,
            hp_after,
        });
        if was_alive && hp_after == 0 {
            trace!(actor = target_id, turn, "death");
            self.events.push(BattleEvent::Death {
                turn,
                actor: target_id,
            });
        }
    }

    fn heal_actor(&mut self, source: ActorId, target_idx: usize, amount: i64, kind: HealKind) {
        let hp_after = self.actors[target_idx].heal(amount);
        self.events.push(BattleEvent::Heal {
            turn: self.turns,
            source,
            target: self.actors[target_idx].id,
            amount,
            kind,
            hp_after,
        });
    }

    /// Applies one buff from `caster_idx` to `target_idx` under the category
    /// limit, then scans buff links unless this application is itself a link
    /// bonus.
    fn apply_buff(
        &mut self,
        caster_idx: usize,
        target_idx: usize,
        buff_id: BuffId,
        allow_links: bool,
    ) -> SimResult<()> {
        let tables = self.tables;
        let row = tables.buffs.get(buff_id)?;
        let limit = tables.buff_limits.get(row.category)?;

        let caster_id = self.actors[caster_idx].id;
        let caster_atk = self.actors[caster_idx].stats.atk;
        let tick_amount = match row.effect {
            BuffEffect::DamageOverTime { power, stat_ratio }
            | BuffEffect::HealOverTime { power, stat_ratio } => {
                skill_magnitude(power, caster_atk, stat_ratio)
            }
            BuffEffect::Stat { .. } | BuffEffect::Stun => 0,
        };
        let seq = self.next_seq;
        self.next_seq += 1;

        let instance = BuffInstance {
            buff_id,
            category: row.category,
            caster: caster_id,
            remaining: row.duration,
            counting: false,
            seq,
            effect: row.effect.clone(),
            tick_amount,
        };
        let target_id = self.actors[target_idx].id;

        match self.actors[target_idx].buffs.apply(instance, limit) {
            ApplyOutcome::Rejected => {
                self.events.push(BattleEvent::BuffRejected {
                    turn: self.turns,
                    target: target_id,
                    buff: buff_id,
                    category: row.category,
                });
                return Ok(());
            }
            ApplyOutcome::Applied { ended } => {
                let mut refresh = matches!(row.effect, BuffEffect::Stat { .. });
                if let Some((old, reason)) = ended {
                    refresh |= old.is_stat();
                    self.events.push(BattleEvent::BuffEnded {
                        turn: self.turns,
                        target: target_id,
                        buff: old.buff_id,
                        category: old.category,
                        reason,
                    });
                }
                self.events.push(BattleEvent::BuffApplied {
                    turn: self.turns,
                    target: target_id,
                    caster: caster_id,
                    buff: buff_id,
                    category: row.category,
                });
                if refresh {
                    self.actors[target_idx].refresh_stats(&tables.constants);
                }
            }
        }

        if allow_links {
            self.trigger_links(caster_idx, target_idx, row.category, seq)?;
        }
        Ok(())
    }

    /// Fires every link completed by the instance `seq`, in link id order.
    fn trigger_links(
        &mut self,
        caster_idx: usize,
        target_idx: usize,
        category: u32,
        seq: u64,
    ) -> SimResult<()> {
        let tables = self.tables;
        let others = self.actors[target_idx].buffs.categories_besides(seq);
        if others.is_empty() {
            return Ok(());
        }

        for link in tables.buff_links.iter() {
            if !self.actors[target_idx].is_alive() {
                break;
            }
            if !others.iter().any(|&other| link.links(category, other)) {
                continue;
            }
            if link.chance < 100 && !self.rng.chance(link.chance) {
                continue;
            }

            let holder = self.actors[target_idx].id;
            let caster_id = self.actors[caster_idx].id;
            let caster_atk = self.actors[caster_idx].stats.atk;
            trace!(link = link.id, actor = holder, turn = self.turns, "buff link");
            self.events.push(BattleEvent::BuffLinkTriggered {
                turn: self.turns,
                actor: holder,
                link: link.id,
            });

            match link.bonus {
                LinkBonus::Damage { power, stat_ratio } => {
                    let amount = skill_magnitude(power, caster_atk, stat_ratio);
                    self.deal_damage(caster_id, target_idx, amount, false, DamageKind::Link);
                }
                LinkBonus::Heal { power, stat_ratio } => {
                    let amount = skill_magnitude(power, caster_atk, stat_ratio);
                    self.heal_actor(caster_id, target_idx, amount, HealKind::Link);
                }
                LinkBonus::ApplyBuff { buff } => {
                    self.apply_buff(caster_idx, target_idx, buff, false)?;
                }
            }
        }
        Ok(())
    }
}

/// Convenience wrapper: build a [`Simulator`] and run it.
pub fn simulate(
    input: SimulatorInput,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<BattleOutput> {
    Simulator::new(input, tables, rng)?.simulate()
}

fn as_percent(value: i64) -> u32 {
    value.clamp(0, 100) as u32
}

fn validate_input(input: &SimulatorInput, tables: &BalanceTables) -> SimResult<()> {
    if input.players.is_empty() {
        return Err(InputError::NoPlayers.into());
    }
    if input.turn_budget == 0 {
        return Err(ConfigError::InvalidTurnBudget {
            owner: "run".to_string(),
        }
        .into());
    }
    if input.waves.is_empty() {
        return Err(ConfigError::NoWaves {
            owner: "run".to_string(),
        }
        .into());
    }

    for (index, wave) in input.waves.iter().enumerate() {
        let expected = index as u32 + 1;
        if wave.number != expected {
            return Err(ConfigError::WaveOrder {
                owner: "run".to_string(),
                expected,
                found: wave.number,
            }
            .into());
        }
        if wave.enemies.is_empty() {
            return Err(ConfigError::EmptyWave {
                owner: "run".to_string(),
                wave: wave.number,
            }
            .into());
        }
        if wave.turn_budget == Some(0) {
            return Err(ConfigError::InvalidTurnBudget {
                owner: format!("run wave {}", wave.number),
            }
            .into());
        }
        if let Some(table) = wave.drop_table {
            tables.drop_tables.get(table)?;
        }
    }

    if let RewardPlan::Upfront(table) | RewardPlan::OnClear(table) = input.rewards {
        tables.drop_tables.get(table)?;
    }

    let mut seen = BTreeSet::new();
    let everyone = input
        .players
        .iter()
        .chain(input.waves.iter().flat_map(|w| w.enemies.iter()));
    for combatant in everyone {
        if combatant.stats.max_hp <= 0 {
            return Err(InputError::NonPositiveHp {
                actor: combatant.actor_id,
                hp: combatant.stats.max_hp,
            }
            .into());
        }
        if combatant.skills.is_empty() {
            return Err(ConfigError::MissingRow {
                table: SkillRow::NAME,
                key: format!("{:?}", tables.constants.basic_attack_skill_id),
            }
            .into());
        }
        if !seen.insert(combatant.actor_id) {
            return Err(InputError::DuplicateActorId(combatant.actor_id).into());
        }
    }
    Ok(())
}
