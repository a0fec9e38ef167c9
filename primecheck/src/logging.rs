//! Logging setup for the primecheck binary.
//!
//! Diagnostics always go to stderr since stdout may carry the verdicts.

use std::fs::File;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

/// The default log directives, used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "info,primecheck=debug,primality=info";

/// Sets up logging based on the provided directives and output format.
///
/// When `profile` is given, the close of every span is additionally written
/// to it as JSON, including the time spent busy and idle inside the span.
pub fn setup_logging(directives: &str, pretty: bool, profile: Option<File>) {
    match pretty {
        true => setup_logging_pretty(directives, profile),
        false => setup_logging_json(directives, profile),
    }
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

fn setup_logging_json(directives: &str, profile: Option<File>) {
    let main_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_current_span(true)
        .with_span_list(true)
        .with_line_number(true)
        .with_file(true)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(main_layer.with_filter(env_filter(directives)))
        .with(profile.map(profile_layer))
        .init()
}

fn setup_logging_pretty(directives: &str, profile: Option<File>) {
    let main_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(main_layer.with_filter(env_filter(directives)))
        .with(profile.map(profile_layer))
        .init()
}

/// A layer recording span timings to `file`. It sees every span regardless
/// of the log directives, and no events.
fn profile_layer<S>(file: File) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_span_list(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(filter_fn(|metadata| metadata.is_span()))
}
