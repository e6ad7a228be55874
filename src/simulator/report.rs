//! Simulation report generation.

use crate::items::{merge_rewards, RewardItem};
use crate::log::{BattleResult, LoseReason};
use serde::Serialize;

/// Outcome of one simulated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub seed: u64,
    pub result: BattleResult,
    pub turns: u32,
    pub cleared_wave_number: u32,
    pub rewards: Vec<RewardItem>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub wins: u32,
    pub defeats: u32,
    pub turn_limit_losses: u32,

    pub avg_turns: f64,
    pub avg_cleared_waves: f64,

    /// Summed over every run, ascending by item id
    pub total_rewards: Vec<RewardItem>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: &[RunStats]) -> Self {
        let num_runs = runs.len() as u32;
        let count = |want: BattleResult| runs.iter().filter(|r| r.result == want).count() as u32;
        let divisor = f64::from(num_runs.max(1));

        Self {
            num_runs,
            wins: count(BattleResult::Win),
            defeats: count(BattleResult::Lose(LoseReason::Defeated)),
            turn_limit_losses: count(BattleResult::Lose(LoseReason::TurnLimit)),
            avg_turns: runs.iter().map(|r| f64::from(r.turns)).sum::<f64>() / divisor,
            avg_cleared_waves: runs
                .iter()
                .map(|r| f64::from(r.cleared_wave_number))
                .sum::<f64>()
                / divisor,
            total_rewards: merge_rewards(runs.iter().flat_map(|r| r.rewards.iter().copied())),
        }
    }

    /// Percentage of runs won.
    pub fn win_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.num_runs) * 100.0
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} won, {} defeated, {} out of turns\n\n",
            self.num_runs, self.wins, self.defeats, self.turn_limit_losses
        ));

        report.push_str("── OUTCOME ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:          {:.1}%\n", self.win_rate()));
        report.push_str(&format!("  Avg Turns:         {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Avg Cleared Waves: {:.2}\n\n",
            self.avg_cleared_waves
        ));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        if self.total_rewards.is_empty() {
            report.push_str("  (none)\n");
        }
        for item in &self.total_rewards {
            report.push_str(&format!(
                "  Item {:>8}  x{:<8} ({:.2} per run)\n",
                item.item_id,
                item.quantity,
                f64::from(item.quantity) / f64::from(self.num_runs.max(1))
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
