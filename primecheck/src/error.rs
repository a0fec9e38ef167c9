//! Top-level error type for the primecheck binary.

use std::path::PathBuf;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file could not be opened.
    #[error("could not open the input file {1}: {0}")]
    OpenInput(#[source] std::io::Error, PathBuf),

    /// The output file could not be created.
    #[error("could not create the output file {1}: {0}")]
    CreateOutput(#[source] std::io::Error, PathBuf),

    /// The profile file could not be created.
    #[error("could not create the profile file {1}: {0}")]
    Profile(#[source] std::io::Error, PathBuf),

    /// The configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Classifying the stream failed.
    #[error("{0}")]
    Pipeline(#[from] primality::Error),
}
