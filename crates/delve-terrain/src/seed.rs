//! Map seeds and seed providers.
//!
//! A [`Seed`] fixes the output of every generator: the RNG stream is derived
//! from its bits and noise generators use it as a sampling offset. Callers
//! that want a fresh map each time ask a [`SeedSource`] for one instead of
//! reaching for a global random generator.

use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of seeds drawn by [`RandomSeed`].
pub const RANDOM_SEED_RANGE: f64 = 1000.0;

/// Seed value for one generation call.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Seed(pub f64);

impl Seed {
    /// The seed as a noise-space offset.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Bit pattern used to seed the RNG. `-0.0` and `0.0` map to the same
    /// stream.
    pub fn to_bits(self) -> u64 {
        if self.0 == 0.0 { 0 } else { self.0.to_bits() }
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<f32> for Seed {
    fn from(value: f32) -> Self {
        Self(value as f64)
    }
}

impl From<i32> for Seed {
    fn from(value: i32) -> Self {
        Self(value as f64)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value as f64)
    }
}

/// Supplies seeds to a generation call.
pub trait SeedSource {
    /// Returns the seed for the next generation.
    fn next_seed(&mut self) -> Seed;
}

/// Always returns the same seed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSeed(pub Seed);

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> Seed {
        self.0
    }
}

/// Draws seeds uniformly from `[0, RANDOM_SEED_RANGE)`.
#[derive(Debug)]
pub struct RandomSeed<R = ThreadRng> {
    rng: R,
}

impl RandomSeed<ThreadRng> {
    /// Seed provider backed by the thread-local RNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSeed<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSeed<R> {
    /// Seed provider backed by a caller-supplied RNG.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SeedSource for RandomSeed<R> {
    fn next_seed(&mut self) -> Seed {
        Seed(self.rng.random_range(0.0..RANDOM_SEED_RANGE))
    }
}
