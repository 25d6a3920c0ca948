//! Tracing subscriber installation.

use super::config::{LogFormat, TracingConfig};
use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Returned by [`init_tracing`]; hold it for as long as logging should run.
#[must_use = "dropping the guard ends the logging session"]
#[derive(Debug)]
pub struct TracingGuard {
    _private: (),
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        tracing::trace!("Logging shut down");
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_tracing(config: TracingConfig) -> Result<TracingGuard> {
    let filter = EnvFilter::try_new(config.filter())
        .with_context(|| format!("Invalid log filter '{}'", config.filter()))?;
    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_thread_names(config.include_thread_names);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(layer.json().with_span_events(FmtSpan::CLOSE).flatten_event(true))
            .try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };
    installed.context("Failed to initialize tracing subscriber")?;

    tracing::debug!(format = ?config.format, filter = %config.filter(), "Logging initialized");
    Ok(TracingGuard { _private: () })
}
