//! Battle modes.
//!
//! Each mode turns its request into one [`SimulatorInput`](crate::combat::SimulatorInput),
//! runs the shared combat loop, and applies whatever the mode does with the
//! log afterwards (score, tier rewards, floor progress).

pub mod arena;
pub mod raid;
pub mod request;
pub mod stage;
pub mod sweep;
pub mod tower;

pub use arena::*;
pub use raid::*;
pub use request::*;
pub use stage::{resolve_stage, run_stage};
pub use sweep::*;
pub use tower::*;

use crate::character::derived_stats::Combatant;
use crate::character::loadout::PlayerLoadout;
use crate::error::SimResult;
use crate::log::BattleOutput;
use crate::rng::BattleRng;
use crate::tables::BalanceTables;

/// Result of any request, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleOutcome {
    Stage(BattleOutput),
    Arena(ArenaOutcome),
    Raid(RaidOutcome),
    Tower(TowerOutcome),
    Sweep(SweepOutcome),
}

/// Dispatches a request to its mode.
pub fn run_request(
    request: &BattleRequest,
    tables: &BalanceTables,
    rng: &mut BattleRng,
) -> SimResult<BattleOutcome> {
    Ok(match request {
        BattleRequest::Stage(r) => BattleOutcome::Stage(run_stage(r, tables, rng)?),
        BattleRequest::Arena(r) => BattleOutcome::Arena(run_arena(r, tables, rng)?),
        BattleRequest::Raid(r) => BattleOutcome::Raid(run_raid(r, tables, rng)?),
        BattleRequest::Tower(r) => BattleOutcome::Tower(run_tower(r, tables, rng)?),
        BattleRequest::Sweep(r) => BattleOutcome::Sweep(run_sweep(r, tables, rng)?),
    })
}

pub(crate) fn resolve_players(
    loadouts: &[PlayerLoadout],
    tables: &BalanceTables,
) -> SimResult<Vec<Combatant>> {
    loadouts
        .iter()
        .map(|loadout| Combatant::from_loadout(loadout, tables))
        .collect()
}
