//! # primecheck
//!
//! The command line front end of the [`primality`] library: argument
//! parsing, configuration, logging and stream setup.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::path::Path;
use std::time::Instant;

use primality::PrimalityTester;
use primality::RunSummary;
use primality::SieveOracle;
use primality::StreamPipeline;

use crate::config::Settings;
use crate::error::Error;

/// The version of the primecheck binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Values classified and logged at startup as a quick sanity check of the
/// freshly built oracle, covering both lookup paths.
pub const SELF_CHECK_VALUES: [u64; 8] = [1, 2, 3, 4, 5, 6, 7, 2147483647];

/// Builds the oracle and classifies `input` into `output`.
///
/// A missing `input` means stdin and a missing `output` means stdout.
pub fn classify(
    settings: &Settings,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<RunSummary, Error> {
    let tester = PrimalityTester::new(SieveOracle::new());
    self_check(&tester)?;

    let pipeline = StreamPipeline::new(tester)
        .with_read_buffer_size(settings.pipeline.read_buffer_size)
        .with_write_buffer_size(settings.pipeline.write_buffer_size);

    let reader = io::open_input(input)?;
    let writer = io::create_output(output)?;

    let start = Instant::now();
    let summary = pipeline.run(reader, writer)?;
    tracing::info!(
        records = summary.records,
        primes = summary.primes,
        elapsed = ?start.elapsed(),
        "classified the input stream"
    );

    Ok(summary)
}

/// Logs the verdict for each of the [`SELF_CHECK_VALUES`].
pub fn self_check(tester: &PrimalityTester) -> Result<(), primality::Error> {
    for value in SELF_CHECK_VALUES {
        let is_prime = tester.is_prime(value)?;
        tracing::debug!(value, is_prime, "self check");
    }
    Ok(())
}
