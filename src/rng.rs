//! Deterministic random source for one simulation run.
//!
//! Every random decision in a battle (skill triggers, hit and crit rolls,
//! random targets, buff-link procs, reward draws) goes through one
//! [`BattleRng`]. Two nodes replaying the same transaction construct it from
//! the same entropy and therefore observe the same stream.
//!
//! Each call consumes a fixed amount of the stream: `next_int` and `chance`
//! take exactly one 64-bit word, `next_guid` takes one 128-bit block.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Seeded ChaCha stream with bounded integer draws.
#[derive(Debug, Clone)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    draws: u64,
}

impl BattleRng {
    /// Derive the stream from caller entropy (e.g. transaction hash bytes).
    ///
    /// The ChaCha key is the SHA-256 digest of `entropy`.
    pub fn from_entropy(entropy: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(entropy);
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&hasher.finalize());
        Self {
            inner: ChaCha8Rng::from_seed(seed),
            draws: 0,
        }
    }

    /// Build the stream from a plain integer seed (tools and tests).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Returns an integer in `[min, max]` inclusive.
    ///
    /// Consumes one word regardless of the range, so the stream position never
    /// depends on the values drawn. Bounds given in the wrong order are swapped.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let word = self.inner.next_u64();
        self.draws += 1;

        let span = (hi as i128 - lo as i128 + 1) as u128;
        let offset = ((word as u128 * span) >> 64) as i128;
        (lo as i128 + offset) as i64
    }

    /// Percentage roll: true when a 1..=100 draw is at most `percent`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_int(1, 100) <= i64::from(percent)
    }

    /// Derives a v4 UUID from one 128-bit block of the stream.
    pub fn next_guid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        self.draws += 1;
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
