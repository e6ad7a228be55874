//! Raid bosses: score is the damage dealt to the boss.

use super::request::RaidRequest;
use super::resolve_players;
use crate::combat::{simulate, RewardPlan, Side, SimulatorInput, Wave};
use crate::error::SimResult;
use crate::items::draw_rewards;
use crate::log::BattleOutput;
use crate::rng::BattleRng;
use crate::tables::{BalanceTables, DropTableId, WaveDef};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidOutcome {
    pub output: BattleOutput,
    pub score: i64,
    /// Drop table of the reward tier reached, if any
    pub tier: Option<DropTableId>,
}

pub fn resolve_raid(request: &RaidRequest, tables: &BalanceTables) -> SimResult<SimulatorInput> {
    let raid = tables.raids.get(request.raid_id)?;
    let boss_wave = WaveDef {
        number: 1,
        enemies: vec![raid.boss],
        turn_budget: None,
        drop_table: None,
    };
    Ok(SimulatorInput {
        players: resolve_players(&request.loadouts, tables)?,
        waves: vec![Wave::from_def(&boss_wave, 0, tables)?],
        turn_budget: raid.turn_budget,
        rewards: RewardPlan::None,
    })
}

/// Runs the fight, then draws from the highest reward tier the score reaches.
/// The tier draw follows every combat draw in the stream.
pub fn run_raid(
    request: &RaidRequest,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<RaidOutcome> {
    let raid = tables.raids.get(request.raid_id)?;
    let input = resolve_raid(request, tables)?;
    let mut output = simulate(input, tables, rng)?;

    let score = output.log.damage_dealt_to(Side::Enemy);
    let tier = raid.reward_tier(score).map(|t| t.drop_table);
    if let Some(table) = tier {
        let items = draw_rewards(tables.drop_tables.get(table)?, rng);
        output.record_rewards(items);
    }
    debug!(raid = request.raid_id, score, ?tier, "raid finished");

    Ok(RaidOutcome {
        output,
        score,
        tier,
    })
}
