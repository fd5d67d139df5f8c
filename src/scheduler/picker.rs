//! Random selection for backfill.
//!
//! Backfill is the only phase that consumes randomness, and it needs just
//! one operation: pick an index uniformly from `0..len`. [`Picker`] is that
//! seam; [`SeededPicker`] is the production implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index selection.
pub trait Picker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`Picker`] backed by a seeded `rand` generator.
#[derive(Debug, Clone)]
pub struct SeededPicker<R = StdRng> {
    rng: R,
}

impl SeededPicker<StdRng> {
    /// Creates a picker whose stream is fully determined by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> SeededPicker<R> {
    /// Wraps an existing generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Picker for SeededPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty pool");
        self.rng.random_range(0..len)
    }
}
