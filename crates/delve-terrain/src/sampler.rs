//! Continuous 2D noise sampling.
//!
//! Generators read noise through [`NoiseSampler`] so a fixed reference
//! function can stand in for the production [`ValueNoise`].

use noise::{NoiseFn, Value};

/// Deterministic continuous 2D noise with values in `[0, 1]`.
pub trait NoiseSampler {
    /// Samples the field at `(x, y)`. The same arguments always return the
    /// same value.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSampler for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Lattice value noise with quintic interpolation.
///
/// The noise seed is fixed; map seeds move the sampling position instead.
#[derive(Clone, Debug)]
pub struct ValueNoise {
    noise: Value,
}

impl ValueNoise {
    /// Seed of the underlying permutation table.
    pub const NOISE_SEED: u32 = 0;

    /// Creates the sampler.
    pub fn new() -> Self {
        Self {
            noise: Value::new(Self::NOISE_SEED),
        }
    }
}

impl Default for ValueNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSampler for ValueNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // `Value` yields [-1, 1].
        ((self.noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
