//! Integration test: full battles through the stage front end
//!
//! Fixed scenarios with hand-checked logs, turn budget exhaustion, and replay
//! determinism (same seed in sequence and across threads).

mod common;

use common::*;
use skirmish::combat::Side;
use skirmish::log::{BattleEvent, BattleOutput, BattleResult, LoseReason};
use skirmish::modes::{run_stage, StageRequest, StageVersion};
use skirmish::rng::BattleRng;
use skirmish::tables::BalanceTables;

fn stage(stage_id: u32, character_id: u32) -> StageRequest {
    StageRequest {
        version: StageVersion::Current,
        stage_id,
        loadouts: solo(character_id),
    }
}

fn play(tables: &BalanceTables, request: &StageRequest, seed: u64) -> BattleOutput {
    let mut rng = BattleRng::from_seed(seed);
    run_stage(request, tables, &mut rng).unwrap()
}

/// (target, hp_after) of every damage event landing on the enemy side.
fn enemy_hits(output: &BattleOutput) -> Vec<(u32, i64)> {
    output
        .log
        .events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::Damage {
                target,
                target_side: Side::Enemy,
                hp_after,
                ..
            } => Some((*target, *hp_after)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Scripted scenarios
// =============================================================================

#[test]
fn test_single_grunt_scenario() {
    let tables = tables();
    let out = play(&tables, &stage(1, PLAYER), 1);

    assert_eq!(enemy_hits(&out), vec![(100, 50), (100, 0)]);
    assert_eq!(out.log.result, BattleResult::Win);
    assert_eq!(out.log.cleared_wave_number, 1);
    assert_eq!(out.log.wave_count, 1);
    assert_eq!(out.log.turns, 3);
    assert_eq!(out.players[0].hp, 490);

    let tail: Vec<&BattleEvent> = out.log.events.iter().rev().take(4).collect();
    assert!(matches!(tail[0], BattleEvent::RewardsDrawn { turn: 3, .. }));
    assert_eq!(
        *tail[1],
        BattleEvent::BattleEnded {
            turn: 3,
            result: BattleResult::Win
        }
    );
    assert_eq!(*tail[2], BattleEvent::WaveCleared { turn: 3, wave: 1 });
    assert_eq!(*tail[3], BattleEvent::Death { turn: 3, actor: 100 });
    assert!(!out.rewards.is_empty());
}

#[test]
fn test_two_wave_scenario() {
    let tables = tables();
    let out = play(&tables, &stage(2, PLAYER), 1);

    assert_eq!(
        enemy_hits(&out),
        vec![(100, 0), (101, 0), (200, 50), (200, 0)]
    );
    assert!(out.log.events.contains(&BattleEvent::WaveStarted {
        turn: 3,
        wave: 2,
        enemies: vec![200],
    }));
    assert_eq!(out.log.result, BattleResult::Win);
    assert_eq!(out.log.cleared_wave_number, 2);
    assert_eq!(out.log.turns, 6);
}

#[test]
fn test_turn_budget_exhaustion() {
    let tables = tables();
    let out = play(&tables, &stage(3, PLAYER), 1);

    assert_eq!(out.log.result, BattleResult::Lose(LoseReason::TurnLimit));
    assert_eq!(out.log.turns, 10);
    assert_eq!(out.log.cleared_wave_number, 0);
    assert!(out.rewards.is_empty());
}

#[test]
fn test_events_never_go_back_in_time() {
    let tables = tables();
    let out = play(&tables, &stage(2, SKILLED_PLAYER), 99);
    let turns: Vec<u32> = out.log.events.iter().map(BattleEvent::turn).collect();
    assert!(turns.windows(2).all(|w| w[0] <= w[1]));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_same_log() {
    let tables = tables();
    let request = stage(2, SKILLED_PLAYER);
    for seed in 0..20 {
        let a = play(&tables, &request, seed);
        let b = play(&tables, &request, seed);
        assert_eq!(a, b);
        assert_eq!(a.log.digest(), b.log.digest());
        assert_eq!(a.log.digest().len(), 64);
    }
}

#[test]
fn test_entropy_seeding_is_stable() {
    let tables = tables();
    let request = stage(2, SKILLED_PLAYER);
    let run = || {
        let mut rng = BattleRng::from_entropy(b"block 1024 tx 7");
        run_stage(&request, &tables, &mut rng).unwrap()
    };
    assert_eq!(run().log.to_bytes(), run().log.to_bytes());
}

#[test]
fn test_parallel_runs_match_sequential() {
    let tables = tables();
    let request = stage(2, SKILLED_PLAYER);
    let seeds: Vec<u64> = (0..8).collect();

    let sequential: Vec<String> = seeds
        .iter()
        .map(|&seed| play(&tables, &request, seed).log.digest())
        .collect();

    let parallel: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&seed| {
                let tables = &tables;
                let request = &request;
                scope.spawn(move || play(tables, request, seed).log.digest())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}
