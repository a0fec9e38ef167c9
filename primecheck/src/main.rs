use std::fs::File;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use primality::RunSummary;
use primecheck::cli::Args;
use primecheck::cli::LogOutputFormat;
use primecheck::config::Settings;
use primecheck::error::Error;
use primecheck::logging::DEFAULT_DIRECTIVES;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse the command line arguments.
    let args = Args::parse();

    // The profile file is opened before logging is set up, since the
    // profile is recorded by one of the logging layers.
    let profile = args.cpuprofile.as_deref().map(create_profile).transpose()?;

    // Configure the binary's stderr output based on the provided output format.
    let pretty = matches!(args.output_format, LogOutputFormat::Pretty);
    primecheck::logging::setup_logging(DEFAULT_DIRECTIVES, pretty, profile);

    tracing::info!(version = primecheck::VERSION, "starting primecheck");
    let start = Instant::now();

    match run(&args) {
        Ok(summary) => {
            tracing::info!(
                records = summary.records,
                primes = summary.primes,
                elapsed = ?start.elapsed(),
                "done"
            );
            Ok(())
        }
        Err(error) => {
            tracing::error!(%error, "a fatal error occurred; aborting the run");
            Err(error.into())
        }
    }
}

fn create_profile(path: &Path) -> Result<File, Error> {
    File::create(path).map_err(|error| Error::Profile(error, path.to_path_buf()))
}

fn run(args: &Args) -> Result<RunSummary, Error> {
    // Load the configuration file and/or environment variables.
    let settings = Settings::new(args.config.as_deref())?;

    primecheck::classify(&settings, args.input.as_deref(), args.output.as_deref())
}
