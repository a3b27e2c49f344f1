//! Deterministic pseudo-random sequence seeded from a string.
//!
//! Used to vary pipeline timing without true randomness so that runs are
//! reproducible in tests. Not a statistical-quality or cryptographic source.

/// Park-Miller modulus, 2^31 - 1.
const MODULUS: u64 = 2_147_483_647;

/// A reproducible pseudo-random stream in `[0, 1)`.
///
/// The initial state folds the seed string's character codes
/// (`h = h * 31 + code mod M`); each call to [`next`](Self::next) advances a
/// linear congruential step (`h = h * 48271 mod M`). Identical seeds produce
/// bit-identical sequences across runs and processes.
#[derive(Debug, Clone)]
pub struct SeededSequence {
    state: u64,
}

impl SeededSequence {
    /// Derive a sequence from a seed string.
    pub fn new(seed: &str) -> Self {
        let mut h: u64 = 0;
        for c in seed.chars() {
            h = (h * 31 + c as u64) % MODULUS;
        }
        Self { state: h }
    }

    /// Produce the next value in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * 48271) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Produce the next value scaled into `[0, max)` as an integer.
    pub fn next_below(&mut self, max: u64) -> u64 {
        (self.next() * max as f64) as u64
    }
}
