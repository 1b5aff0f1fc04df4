//! Tracing setup and command logging helpers

use std::time::Duration;

use dayon_domain::DayOnError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Output format for log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global subscriber.
///
/// Honors `RUST_LOG`; falls back to `default_directive` (e.g. `"info"`).
/// Calling it twice is harmless: the second install is ignored.
pub fn init_tracing(format: LogFormat, default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter);
    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if result.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"calendar::show"`; never pass
/// tokens or codes through it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, outcome: Result<(), &DayOnError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(()) => info!(command, duration_ms, "command_execution_success"),
        Err(err) => {
            warn!(command, duration_ms, error_type = err.label(), "command_execution_failure");
        }
    }
}
