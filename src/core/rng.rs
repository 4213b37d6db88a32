//! Seeded randomness for shuffles, coin flips and exploration.
//!
//! An environment owns one `GameRng` and reseeds it on every reset, so a
//! game seed fixes the shuffle, the first seat and every opponent
//! exploration draw. Agents get their own stream through `fork`.
//!
//! ```
//! use go_fish::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.coin_flip(), b.coin_flip());
//! assert_eq!(a.fork().seed(), b.fork().seed());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::Seat;

// Golden-ratio increment; spreads consecutive fork seeds apart.
const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8-backed RNG that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Derive an independent stream. The n-th fork of a given seed is
    /// always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STEP)))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed for the next unseeded reset.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Fair coin deciding who moves first.
    pub fn coin_flip(&mut self) -> Seat {
        if self.inner.gen_bool(0.5) {
            Seat::Agent
        } else {
            Seat::Opponent
        }
    }

    /// `true` with `probability`, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
