//! Deterministic random stream for generators.
//!
//! Wraps `ChaCha8Rng`, whose output is identical on every platform, and
//! exposes the small set of draws the generators need. Each generator
//! documents the exact order in which it draws; changing that order changes
//! the map produced for a given seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Seed;

/// Seeded random stream used by every generator.
#[derive(Clone, Debug)]
pub struct GenRng {
    inner: ChaCha8Rng,
}

impl GenRng {
    /// Starts a stream derived from `seed`.
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed.to_bits()),
        }
    }

    /// Integer in `[min, max_exclusive)`.
    ///
    /// An empty range yields `min` without consuming randomness, so a zero
    /// drift or a one-cell interior is not an error.
    pub fn next_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.inner.random_range(min..max_exclusive)
    }

    /// Float in `[0, 1)`.
    pub fn next_float01(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Returns `true` with probability `p` by drawing one float.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_float01() < p
    }
}
