//! Deterministic roll stream — the only source of randomness in the engine.
//!
//! Every draw is a pure function of `(seed, counter)`: the pair is hashed
//! with SHA-256 and the digest seeds a one-shot [`ChaCha8Rng`] that produces
//! a single uniform sample. Replaying the same seed from counter 0 therefore
//! reproduces the exact draw sequence, which is what lets a suspended action
//! be saved mid-roll and resumed bit-for-bit. The label attached to a draw
//! never influences the value; it only feeds the audit trail.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::ROLL_HISTORY_CAP;

/// One audited draw: which counter produced it, what asked for it, and the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRecord {
    pub counter: u64,
    pub label: String,
    pub value: f64,
}

/// Seeded counter-based random source.
///
/// Only `seed` and `counter` matter for determinism; the history is a
/// bounded diagnostic ring and is not part of the replay contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollStream {
    seed: String,
    counter: u64,
    #[serde(default)]
    history: Vec<DrawRecord>,
}

impl RollStream {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: 0,
            history: Vec::new(),
        }
    }

    /// A derived stream for one area's content, independent of the main
    /// counter so materialization order never changes what gets generated.
    pub fn for_area(world_seed: &str, distance: u32, index: u32) -> Self {
        Self::new(format!("{world_seed}/area/{distance}/{index}"))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    /// Draws a uniform sample in `[min, max)`.
    ///
    /// Total over its domain: a degenerate range returns `min`. The counter
    /// advances by exactly 1 either way.
    pub fn draw(&mut self, min: f64, max: f64, label: &str) -> f64 {
        let value = if max > min {
            let mut rng = self.rng_for_counter();
            rng.gen_range(min..max)
        } else {
            min
        };
        self.record(label, value);
        self.counter += 1;
        value
    }

    /// Draws a uniform sample in `[0, 1)`.
    pub fn draw_unit(&mut self, label: &str) -> f64 {
        self.draw(0.0, 1.0, label)
    }

    /// One success/failure roll against `chance`.
    pub fn draw_bool(&mut self, chance: f64, label: &str) -> bool {
        self.draw_unit(label) < chance
    }

    /// Draws an integer in `[min, max]` (inclusive), for content tables.
    pub fn draw_index(&mut self, min: u64, max: u64, label: &str) -> u64 {
        let span = (max - min + 1) as f64;
        let unit = self.draw_unit(label);
        min + ((unit * span) as u64).min(max - min)
    }

    fn rng_for_counter(&self) -> ChaCha8Rng {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(self.counter.to_le_bytes());
        let digest = hasher.finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        ChaCha8Rng::seed_from_u64(u64::from_le_bytes(word))
    }

    fn record(&mut self, label: &str, value: f64) {
        if self.history.len() == ROLL_HISTORY_CAP {
            self.history.remove(0);
        }
        self.history.push(DrawRecord {
            counter: self.counter,
            label: label.to_string(),
            value,
        });
    }
}
