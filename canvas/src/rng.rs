//! Injectable randomness.
//!
//! Every sampler in the crate (wander headings, particle jitter, sensor values)
//! draws through [`RandomSource`] so tests can substitute exact sequences.

#[cfg(test)]
#[path = "rng_test.rs"]
mod rng_test;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform sample in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.unit() * (max - min)
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

/// Seeded pseudo-random source backed by `SmallRng`.
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(values: &[f64]) -> Self {
        Self { values: values.to_vec(), cursor: 0 }
    }

    /// A source that always yields `value`.
    pub(crate) fn constant(value: f64) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
