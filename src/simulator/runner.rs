//! Runs one stage over consecutive seeds.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::character::loadout::PlayerLoadout;
use crate::error::SimResult;
use crate::modes::{run_stage, StageRequest, StageVersion};
use crate::rng::BattleRng;
use crate::tables::BalanceTables;
use tracing::info;

/// Run the full simulation and return a report.
pub fn run_simulation(
    config: &SimConfig,
    tables: &BalanceTables,
    loadouts: &[PlayerLoadout],
) -> SimResult<SimReport> {
    let request = StageRequest {
        version: StageVersion::Current,
        stage_id: config.stage_id,
        loadouts: loadouts.to_vec(),
    };

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let seed = config.seed.wrapping_add(u64::from(run_idx));
        let run = simulate_single_run(&request, tables, seed)?;

        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                seed,
                result = ?run.result,
                turns = run.turns,
                cleared = run.cleared_wave_number,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(&all_runs);
    if config.verbosity >= 1 {
        info!(
            stage = config.stage_id,
            runs = report.num_runs,
            win_rate = report.win_rate(),
            "simulation finished"
        );
    }
    Ok(report)
}

/// One stage play on a fresh generator seeded with `seed`.
pub fn simulate_single_run(
    request: &StageRequest,
    tables: &BalanceTables,
    seed: u64,
) -> SimResult<RunStats> {
    let mut rng = BattleRng::from_seed(seed);
    let output = run_stage(request, tables, &mut rng)?;
    Ok(RunStats {
        seed,
        result: output.log.result,
        turns: output.log.turns,
        cleared_wave_number: output.log.cleared_wave_number,
        rewards: output.rewards,
    })
}
