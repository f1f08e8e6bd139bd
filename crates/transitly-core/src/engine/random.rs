// ── Random sources ──
//
// Every probabilistic transition draws from a `RandomSource` so tests can
// substitute scripted draws and assert exact outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws in `[0, 1)` plus the derived helpers the simulator needs.
pub trait RandomSource: Send {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform in `[-magnitude, +magnitude)`.
    fn symmetric(&mut self, magnitude: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * magnitude
    }

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    fn below(&mut self, bound: u32) -> u32 {
        let scaled = (self.next_unit() * f64::from(bound)).floor();
        (scaled as u32).min(bound.saturating_sub(1))
    }
}

/// Production source backed by `StdRng`.
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::RandomSource;

    /// Replays a fixed list of draws, then a fallback value forever.
    pub(crate) struct Scripted {
        draws: VecDeque<f64>,
        fallback: f64,
    }

    impl Scripted {
        pub(crate) fn new(draws: impl IntoIterator<Item = f64>) -> Self {
            Self {
                draws: draws.into_iter().collect(),
                fallback: 0.99,
            }
        }

        pub(crate) fn with_fallback(mut self, fallback: f64) -> Self {
            self.fallback = fallback;
            self
        }

        pub(crate) fn remaining(&self) -> usize {
            self.draws.len()
        }
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            self.draws.pop_front().unwrap_or(self.fallback)
        }
    }
}
