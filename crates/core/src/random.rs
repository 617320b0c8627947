//! Uniform random source behind a trait so cohort assignment is
//! deterministic under test.

use rand::Rng;

/// Produces a uniform value in `[0, 1)` per call.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Thread-local RNG source for production use.
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same value. Pins weighted selection to a known pool
/// index in tests.
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}
