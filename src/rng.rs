// Injected randomness for tick increments and event rolls

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&mut self) -> f64;
}

/// Production generator backed by `StdRng`.
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Seeded when `seed` is set (reproducible runs), entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Replays a fixed cycle of draws, for tests that need exact increments.
/// Values are clamped into `[0, 1)`. Not used by the server.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    draws: Vec<f64>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws: Vec<f64> = draws.into();
        let draws = if draws.is_empty() { vec![0.0] } else { draws };
        Self { draws, next: 0 }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self.draws[self.next % self.draws.len()];
        self.next = self.next.wrapping_add(1);
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
