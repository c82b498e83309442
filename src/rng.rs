//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a run.
//! Every engine owns one and lends it to the strategy functions it calls, so a run
//! seeded with [`RandomNumberGenerator::from_seed`] is fully reproducible.
//!
//! ## Example
//!
//! ```rust
//! use heurist::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let draw = rng.uniform();
//! assert!((0.0..1.0).contains(&draw));
//!
//! let index = rng.index(13);
//! assert!(index < 13);
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniformly distributed value from `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a uniformly distributed index from `0..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Draws two distinct indices from `0..bound`, resampling until they differ.
    ///
    /// Returns `None` when `bound < 2`, since no distinct pair exists.
    pub fn distinct_pair(&mut self, bound: usize) -> Option<(usize, usize)> {
        if bound < 2 {
            return None;
        }
        let mut first = self.index(bound);
        let mut second = self.index(bound);
        while first == second {
            first = self.index(bound);
            second = self.index(bound);
        }
        Some((first, second))
    }

    /// Shuffles the slice in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
