#![deny(missing_docs)]

//! # Primality Library
//!
//! This library classifies streams of non-negative integers as prime or not
//! prime. It provides the sieve-built oracle for small values, the
//! trial-division fallback for large values, and the buffered byte pipeline
//! that connects them to an input and an output stream.

pub mod bitmap;
pub mod decimal;
pub mod error;
pub mod sieve;
pub mod stream;
pub mod tester;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::Error;
pub use sieve::SieveOracle;
pub use stream::RunSummary;
pub use stream::StreamPipeline;
pub use tester::PrimalityTester;

/// The largest value answered straight from the sieve bitmap.
///
/// This is `2^17`. Values above it are answered by trial division against the
/// primes found below it, which bounds the queryable range at
/// [`MAX_QUERYABLE`].
pub const CEILING: u64 = 1 << 17;

/// The largest value that can be classified with the reference
/// [`CEILING`], that is `CEILING * CEILING`.
pub const MAX_QUERYABLE: u64 = CEILING * CEILING;

/// The default capacity, in bytes, of the read and write buffers used by
/// the [`StreamPipeline`].
pub const DEFAULT_BUFFER_SIZE: usize = 1_000_000;
