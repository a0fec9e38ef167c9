//! Top-level error type for the primality library
//!

use crate::decimal::DecimalError;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested sieve ceiling is not usable.
    #[error("the sieve ceiling must be a power of two between 2 and 2^31, got {0}")]
    InvalidCeiling(u64),

    /// A primality query exceeded the largest supported value.
    #[error("cannot classify {value}: only values up to {max} are supported")]
    OutOfRange {
        /// The value that was queried.
        value: u64,
        /// The largest value this tester supports.
        max: u64,
    },

    /// A line of input could not be parsed as a decimal integer.
    #[error("could not parse line {line} ({token:?}): {source}")]
    InvalidToken {
        /// The 1-based line number of the offending token.
        line: u64,
        /// The offending token, decoded lossily as UTF-8. For a line longer
        /// than the read buffer this is the part of it that was buffered when
        /// the error was found.
        token: String,
        /// The reason the token was rejected.
        #[source]
        source: DecimalError,
    },

    /// Reading from the input failed.
    #[error("failed to read from the input: {0}")]
    ReadInput(#[source] std::io::Error),

    /// Writing to the output failed.
    #[error("failed to write to the output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
