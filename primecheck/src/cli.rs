//! Command line arguments for primecheck.

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

/// The format of the diagnostic log written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogOutputFormat {
    /// One JSON object per line.
    Json,
    /// Human readable, multi-line output.
    Pretty,
}

/// Reads one non-negative integer per line and writes `1` for each prime and
/// `0` for everything else, one verdict per line.
#[derive(Debug, Parser)]
#[clap(name = "primecheck", version)]
pub struct Args {
    /// File to read the integers from. Reads from stdin when omitted.
    pub input: Option<PathBuf>,

    /// File to write the verdicts to. Writes to stdout when omitted.
    pub output: Option<PathBuf>,

    /// Write a profile of the span timings of this run to the given file.
    #[clap(long, value_name = "FILE")]
    pub cpuprofile: Option<PathBuf>,

    /// Optional path to the configuration file. If not provided, the
    /// defaults and any `PRIMECHECK_` environment variables are used.
    #[clap(short = 'c', long, required = false)]
    pub config: Option<PathBuf>,

    /// The format of the diagnostic log written to stderr.
    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    pub output_format: LogOutputFormat,
}
