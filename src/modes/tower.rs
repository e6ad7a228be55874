//! Infinite tower floors.

use super::request::TowerRequest;
use super::resolve_players;
use crate::combat::{resolve_waves, simulate, RewardPlan, SimulatorInput};
use crate::error::{InputError, SimResult};
use crate::items::draw_rewards;
use crate::log::BattleOutput;
use crate::rng::BattleRng;
use crate::tables::BalanceTables;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerOutcome {
    pub output: BattleOutput,
    /// The attempted floor on a win, otherwise unchanged
    pub cleared_floor: u32,
}

/// Enemy percent bonus on `floor`: `stat_growth_pct * (floor - 1)`.
pub fn floor_scale_pct(stat_growth_pct: i64, floor: u32) -> i64 {
    stat_growth_pct.saturating_mul(i64::from(floor.saturating_sub(1)))
}

pub fn resolve_tower(request: &TowerRequest, tables: &BalanceTables) -> SimResult<SimulatorInput> {
    if request.floor != request.cleared_floor.saturating_add(1) {
        return Err(InputError::FloorLocked {
            floor: request.floor,
            cleared: request.cleared_floor,
        }
        .into());
    }
    let row = tables.tower_floors.get(request.floor)?;
    let scale = floor_scale_pct(row.stat_growth_pct, request.floor);
    Ok(SimulatorInput {
        players: resolve_players(&request.loadouts, tables)?,
        waves: resolve_waves(&row.waves, scale, tables)?,
        turn_budget: row
            .turn_budget
            .unwrap_or(tables.constants.default_stage_turn_budget),
        rewards: RewardPlan::PerWave,
    })
}

/// Wave rewards are drawn as waves fall; the floor reward follows a win.
pub fn run_tower(
    request: &TowerRequest,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<TowerOutcome> {
    let input = resolve_tower(request, tables)?;
    let row = tables.tower_floors.get(request.floor)?;
    let mut output = simulate(input, tables, rng)?;

    let won = output.log.is_win();
    if won {
        if let Some(table) = row.drop_table {
            let items = draw_rewards(tables.drop_tables.get(table)?, rng);
            output.record_rewards(items);
        }
    }
    debug!(floor = request.floor, won, "tower floor finished");

    Ok(TowerOutcome {
        output,
        cleared_floor: if won {
            request.floor
        } else {
            request.cleared_floor
        },
    })
}
