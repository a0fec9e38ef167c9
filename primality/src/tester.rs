//! Primality queries on top of a [`SieveOracle`].

use std::sync::Arc;

use crate::error::Error;
use crate::sieve::SieveOracle;

/// Answers whether a number is prime, for any number up to the square of the
/// oracle's ceiling.
///
/// Values up to the ceiling are a single bitmap lookup. Larger values are
/// trial divided by the cached primes, which is enough because every prime
/// up to `sqrt(ceiling^2) = ceiling` is cached.
///
/// Cloning is cheap, and the tester has no interior mutability, so clones
/// may be used from any number of threads.
#[derive(Debug, Clone)]
pub struct PrimalityTester {
    oracle: Arc<SieveOracle>,
}

impl PrimalityTester {
    /// Creates a tester backed by the given oracle.
    pub fn new(oracle: SieveOracle) -> Self {
        Self {
            oracle: Arc::new(oracle),
        }
    }

    /// The oracle backing this tester.
    pub fn oracle(&self) -> &SieveOracle {
        &self.oracle
    }

    /// The largest value accepted by [`PrimalityTester::is_prime`].
    pub fn max_queryable(&self) -> u64 {
        self.oracle.max_queryable()
    }

    /// Returns whether `x` is prime.
    ///
    /// ## Errors
    /// [`Error::OutOfRange`] if `x` exceeds
    /// [`PrimalityTester::max_queryable`]. This is never reported as a
    /// wrong answer.
    #[inline]
    pub fn is_prime(&self, x: u64) -> Result<bool, Error> {
        if x <= self.oracle.ceiling() {
            return Ok(self.oracle.is_prime_cached(x));
        }

        let max = self.max_queryable();
        if x > max {
            return Err(Error::OutOfRange { value: x, max });
        }

        for &prime in self.oracle.primes() {
            let prime = prime as u64;
            // Cannot overflow: prime <= ceiling and ceiling^2 fits into a u64.
            if prime * prime > x {
                break;
            }
            if x % prime == 0 {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl From<SieveOracle> for PrimalityTester {
    fn from(oracle: SieveOracle) -> Self {
        Self::new(oracle)
    }
}
