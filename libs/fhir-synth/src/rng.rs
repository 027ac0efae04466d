//! Pluggable random source
//!
//! Synthesis intentionally randomizes code and date selection so repeated
//! calls produce varied test data. Everything draws from a [`RandomSource`]
//! so callers can inject a seeded source and make scenarios deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness for the synthesis engine
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Thread-local randomness for production use
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random()
    }
}

/// Deterministic, seeded randomness for reproducible scenarios
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }
}
