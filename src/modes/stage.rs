//! Main and event stage battles.

use super::request::{StageRequest, StageVersion};
use super::resolve_players;
use crate::character::loadout::PlayerLoadout;
use crate::combat::{resolve_waves, simulate, RewardPlan, SimulatorInput};
use crate::error::SimResult;
use crate::log::BattleOutput;
use crate::rng::BattleRng;
use crate::tables::{BalanceTables, StageRow};
use tracing::debug;

/// Normalizes a stage request of any version into simulator input.
///
/// Legacy requests draw the clear reward before the first wave; current
/// requests draw it after a win.
pub fn resolve_stage(request: &StageRequest, tables: &BalanceTables) -> SimResult<SimulatorInput> {
    for loadout in &request.loadouts {
        request.version.check_loadout(loadout)?;
    }
    let stage = tables.stages.get(request.stage_id)?;
    let rewards = match (request.version, stage.drop_table) {
        (_, None) => RewardPlan::None,
        (StageVersion::Legacy, Some(table)) => RewardPlan::Upfront(table),
        (StageVersion::Current, Some(table)) => RewardPlan::OnClear(table),
    };
    stage_input(stage, &request.loadouts, rewards, tables)
}

pub(crate) fn stage_input(
    stage: &StageRow,
    loadouts: &[PlayerLoadout],
    rewards: RewardPlan,
    tables: &BalanceTables,
) -> SimResult<SimulatorInput> {
    Ok(SimulatorInput {
        players: resolve_players(loadouts, tables)?,
        waves: resolve_waves(&stage.waves, 0, tables)?,
        turn_budget: stage
            .turn_budget
            .unwrap_or(tables.constants.default_stage_turn_budget),
        rewards,
    })
}

pub fn run_stage(
    request: &StageRequest,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<BattleOutput> {
    let input = resolve_stage(request, tables)?;
    let output = simulate(input, tables, rng)?;
    debug!(
        stage = request.stage_id,
        version = request.version.name(),
        result = ?output.log.result,
        "stage finished"
    );
    Ok(output)
}
