//! Seeded deterministic sequence, the crate's only source of randomness.
//!
//! A Park–Miller "minimal standard" linear congruential generator:
//!
//! ```text
//! state' = state × 16807  mod  (2³¹ − 1)
//! next   = (state' − 1) / (2³¹ − 2)        ∈ [0, 1)
//! ```
//!
//! The recurrence, the modulus and the seed mapping are part of the public
//! contract: a given seed produces the same bit-for-bit stream on every
//! platform and in every implementation that follows the same formula. The
//! arithmetic runs in `u64`, so no intermediate product can overflow.

/// LCG multiplier (7⁵).
pub const MULTIPLIER: u64 = 16_807;

/// LCG modulus, the Mersenne prime 2³¹ − 1.
pub const MODULUS: u64 = 2_147_483_647;

/// Seeded pseudo-random stream of `f64` values in `[0, 1)`.
///
/// Single-threaded by construction: `next` takes `&mut self`. Independent
/// streams are made by constructing independent generators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededSequence {
    /// Current state, always in `[1, MODULUS − 1]`.
    state: u64,
}

impl SeededSequence {
    /// Create a stream from an arbitrary integer seed.
    ///
    /// The seed is folded into the valid state range with
    /// `seed.rem_euclid(MODULUS − 1) + 1`, so zero and negative seeds are
    /// accepted and never produce the degenerate all-zero state.
    pub fn new(seed: i64) -> Self {
        let folded = seed.rem_euclid((MODULUS - 1) as i64) as u64 + 1;
        Self { state: folded }
    }

    /// Advance the state and return the next value in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Next value scaled into `[lo, hi)`.
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next()
    }

    /// Raw generator state. Exposed for reproducibility checks.
    pub fn state(&self) -> u64 {
        self.state
    }
}
