//! # Sieve Oracle
//!
//! Builds the compositeness bitmap and the ascending prime list for every
//! integer up to a ceiling using the sieve of Eratosthenes. Both are built
//! once and never mutated afterwards, so an oracle can be shared freely
//! between threads.
//!
//! The outer loop runs all the way to the ceiling rather than stopping at its
//! square root, since it also collects the primes between the two. Marking
//! starts at `2i`.

use std::time::Instant;

use crate::bitmap::CompositeBitmap;
use crate::error::Error;
use crate::CEILING;

/// The largest ceiling whose square still fits into a `u64`.
const MAX_CEILING: u64 = 1 << 31;

/// The precomputed primality tables for all integers up to a ceiling.
#[derive(Debug, Clone)]
pub struct SieveOracle {
    bitmap: CompositeBitmap,
    primes: Vec<u32>,
    ceiling: u64,
}

impl SieveOracle {
    /// Builds the oracle for the reference [`CEILING`].
    pub fn new() -> Self {
        Self::build(CEILING)
    }

    /// Builds the oracle for the given ceiling.
    ///
    /// The ceiling must be a power of two of at least 2 whose square fits
    /// into a `u64`.
    pub fn with_ceiling(ceiling: u64) -> Result<Self, Error> {
        if ceiling < 2 || !ceiling.is_power_of_two() || ceiling > MAX_CEILING {
            return Err(Error::InvalidCeiling(ceiling));
        }

        Ok(Self::build(ceiling))
    }

    #[tracing::instrument(name = "sieve_build")]
    fn build(ceiling: u64) -> Self {
        let start = Instant::now();

        let mut bitmap = CompositeBitmap::new(ceiling);
        let mut primes = Vec::new();

        bitmap.set_composite(0);
        bitmap.set_composite(1);

        for i in 2..=ceiling {
            if bitmap.is_composite(i) {
                continue;
            }
            // `ceiling` is at most 2^31, so every prime fits into a u32.
            primes.push(i as u32);

            let mut multiple = 2 * i;
            while multiple <= ceiling {
                bitmap.set_composite(multiple);
                multiple += i;
            }
        }

        tracing::info!(
            ceiling,
            primes = primes.len(),
            bitmap_bytes = bitmap.byte_len(),
            elapsed = ?start.elapsed(),
            "built the sieve oracle"
        );

        Self {
            bitmap,
            primes,
            ceiling,
        }
    }

    /// The largest value answered directly from the bitmap.
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// The largest value that can be classified with this oracle, the square
    /// of the ceiling.
    pub fn max_queryable(&self) -> u64 {
        self.ceiling * self.ceiling
    }

    /// All primes up to and including the ceiling, in ascending order.
    pub fn primes(&self) -> &[u32] {
        &self.primes
    }

    /// The compositeness bitmap for `0..=ceiling`.
    pub fn bitmap(&self) -> &CompositeBitmap {
        &self.bitmap
    }

    /// Looks up whether `x` is prime.
    ///
    /// ## Panics
    /// If `x` is larger than the ceiling.
    #[inline]
    pub fn is_prime_cached(&self, x: u64) -> bool {
        !self.bitmap.is_composite(x)
    }
}

impl Default for SieveOracle {
    fn default() -> Self {
        Self::new()
    }
}
