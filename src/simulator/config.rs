//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// First seed; run `i` uses `seed + i`
    pub seed: u64,

    /// Stage replayed by every run
    pub stage_id: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: 42,
            stage_id: 1,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking one stage
    pub fn stage_balance_test(stage_id: u32) -> Self {
        Self {
            num_runs: 100,
            stage_id,
            ..Default::default()
        }
    }
}
