//! Offline balance analysis.
//!
//! Replays one stage over many seeds with the same loadouts and aggregates
//! outcomes, so table changes can be judged by win rate and reward yield.
//! Every run goes through the same mode front end as a live request.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
