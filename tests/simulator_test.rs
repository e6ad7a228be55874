//! Integration test: offline balance simulation

mod common;

use common::*;
use skirmish::log::BattleResult;
use skirmish::simulator::{run_simulation, simulate_single_run, SimConfig};

#[test]
fn test_easy_stage_always_wins() {
    let tables = tables();
    let config = SimConfig {
        num_runs: 10,
        seed: 100,
        stage_id: 1,
        verbosity: 0,
    };
    let report = run_simulation(&config, &tables, &solo(PLAYER)).unwrap();

    assert_eq!(report.num_runs, 10);
    assert_eq!(report.wins, 10);
    assert!((report.win_rate() - 100.0).abs() < f64::EPSILON);
    assert!((report.avg_turns - 3.0).abs() < f64::EPSILON);
    assert!((report.avg_cleared_waves - 1.0).abs() < f64::EPSILON);
    let quantity: u32 = report.total_rewards.iter().map(|r| r.quantity).sum();
    assert!(quantity >= 10);
}

#[test]
fn test_budget_stage_reports_turn_limit_losses() {
    let tables = tables();
    let config = SimConfig {
        num_runs: 5,
        stage_id: 3,
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config, &tables, &solo(PLAYER)).unwrap();

    assert_eq!(report.wins, 0);
    assert_eq!(report.turn_limit_losses, 5);
    assert!(report.total_rewards.is_empty());
    assert!(report.to_json().contains("\"turn_limit_losses\": 5"));
}

#[test]
fn test_runs_use_consecutive_seeds() {
    let tables = tables();
    let config = SimConfig {
        num_runs: 3,
        seed: 40,
        stage_id: 2,
        verbosity: 0,
    };
    let report = run_simulation(&config, &tables, &solo(SKILLED_PLAYER)).unwrap();

    let request = skirmish::modes::StageRequest {
        version: skirmish::modes::StageVersion::Current,
        stage_id: 2,
        loadouts: solo(SKILLED_PLAYER),
    };
    let runs: Vec<_> = (40..43)
        .map(|seed| simulate_single_run(&request, &tables, seed).unwrap())
        .collect();
    let wins = runs.iter().filter(|r| r.result == BattleResult::Win).count() as u32;
    assert_eq!(report.wins, wins);
}

#[test]
fn test_missing_stage_fails() {
    let tables = tables();
    let config = SimConfig::stage_balance_test(404);
    assert!(run_simulation(&config, &tables, &solo(PLAYER)).is_err());
}
