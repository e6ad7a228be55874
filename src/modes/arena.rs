//! Arena duels: the opponent's loadout fights on the enemy side.

use super::request::ArenaRequest;
use crate::character::derived_stats::Combatant;
use crate::combat::{simulate, RewardPlan, SimulatorInput, Wave, ENEMY_ID_STRIDE};
use crate::error::SimResult;
use crate::log::BattleOutput;
use crate::rng::BattleRng;
use crate::tables::BalanceTables;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaOutcome {
    pub output: BattleOutput,
    pub score_delta: i64,
    pub new_score: i64,
}

/// The opponent is resolved through the player pipeline and fields as the
/// only enemy of a single wave, under the first enemy slot id.
pub fn resolve_arena(request: &ArenaRequest, tables: &BalanceTables) -> SimResult<SimulatorInput> {
    let me = Combatant::from_loadout(&request.me, tables)?;
    let mut opponent = Combatant::from_loadout(&request.opponent, tables)?;
    opponent.actor_id = ENEMY_ID_STRIDE;

    Ok(SimulatorInput {
        players: vec![me],
        waves: vec![Wave {
            number: 1,
            enemies: vec![opponent],
            turn_budget: None,
            drop_table: None,
        }],
        turn_budget: tables.constants.arena_turn_budget,
        rewards: RewardPlan::None,
    })
}

pub fn run_arena(
    request: &ArenaRequest,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<ArenaOutcome> {
    let input = resolve_arena(request, tables)?;
    let output = simulate(input, tables, rng)?;
    let score_delta = tables.constants.arena_score_delta(
        request.my_score,
        request.opponent_score,
        output.log.is_win(),
    );
    debug!(
        result = ?output.log.result,
        score_delta,
        "arena duel finished"
    );
    Ok(ArenaOutcome {
        new_score: request.my_score.saturating_add(score_delta),
        output,
        score_delta,
    })
}
