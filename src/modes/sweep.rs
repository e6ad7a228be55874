//! Repeated plays of an already cleared stage.

use super::request::SweepRequest;
use super::stage::stage_input;
use crate::combat::{simulate, RewardPlan};
use crate::error::{InputError, SimResult};
use crate::items::{merge_rewards, RewardItem};
use crate::log::BattleResult;
use crate::rng::BattleRng;
use crate::tables::BalanceTables;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What one play of a sweep produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySummary {
    pub result: BattleResult,
    pub cleared_wave_number: u32,
    pub wave_count: u32,
    pub turns: u32,
    pub rewards: Vec<RewardItem>,
    /// Hex SHA-256 of the play's serialized log
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub plays: Vec<PlaySummary>,
    /// Rewards of every play, merged by item id
    pub rewards: Vec<RewardItem>,
    pub wins: u32,
}

/// Plays the stage `play_count` times on one shared stream. Play `n + 1`
/// starts where play `n` left the generator.
pub fn run_sweep(
    request: &SweepRequest,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<SweepOutcome> {
    if request.play_count <= 0 {
        return Err(InputError::InvalidPlayCount(request.play_count).into());
    }
    if request.stage_id > request.cleared_stage {
        return Err(InputError::StageLocked {
            stage: request.stage_id,
            cleared: request.cleared_stage,
        }
        .into());
    }
    let stage = tables.stages.get(request.stage_id)?;
    let rewards = stage.drop_table.map_or(RewardPlan::None, RewardPlan::OnClear);
    let input = stage_input(stage, &request.loadouts, rewards, tables)?;

    let mut plays = Vec::with_capacity(request.play_count as usize);
    for play in 0..request.play_count {
        let output = simulate(input.clone(), tables, rng)?;
        debug!(play, result = ?output.log.result, "sweep play finished");
        plays.push(PlaySummary {
            result: output.log.result,
            cleared_wave_number: output.log.cleared_wave_number,
            wave_count: output.log.wave_count,
            turns: output.log.turns,
            digest: output.log.digest(),
            rewards: output.rewards,
        });
    }

    let wins = plays.iter().filter(|p| p.result == BattleResult::Win).count() as u32;
    let rewards = merge_rewards(plays.iter().flat_map(|p| p.rewards.iter().copied()));
    Ok(SweepOutcome {
        plays,
        rewards,
        wins,
    })
}
