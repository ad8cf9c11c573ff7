//! Pluggable random source for message and resource selection.
//!
//! The idle message pool and the audio-file pick are the only two places the
//! companion is nondeterministic. Both draw through [`RandomSource`] so that
//! scenario tests can inject a seeded generator and assert on exact picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index selection over a slice of candidates.
pub trait RandomSource {
    /// Picks an index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Random source backed by the thread-local generator. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic random source seeded from a `u64`, for tests.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    /// Creates a source whose pick sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}
