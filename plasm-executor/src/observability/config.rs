//! Logging configuration read from the environment.

use anyhow::{Result, bail};
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Multi-line output for terminals.
    Pretty,
    /// Single-line output.
    Compact,
}

impl LogFormat {
    /// `Pretty` when stderr is a terminal, `Compact` otherwise.
    pub fn detect() -> Self {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Filter directive for a `-v` count: 0 is `warn`, 3 and above is `trace`.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Settings for [`init_tracing`](super::init_tracing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directives; `None` means [`TracingConfig::DEFAULT_FILTER`].
    pub filter: Option<String>,
    /// Add file and line to every event.
    pub include_location: bool,
    /// Add the thread name (e.g. `plasm-worker-3`) to every event.
    pub include_thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            filter: None,
            include_location: false,
            include_thread_names: true,
        }
    }
}

impl TracingConfig {
    /// Filter used when nothing else was chosen.
    pub const DEFAULT_FILTER: &'static str = "info";

    /// Read `PLASM_LOG_FORMAT`, `PLASM_LOG_LEVEL` (falling back to
    /// `RUST_LOG`) and `PLASM_LOG_LOCATION`.
    ///
    /// An unset format is detected from stderr. An unknown format is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let format = match var("PLASM_LOG_FORMAT") {
            Some(raw) => match raw.parse::<LogFormat>() {
                Ok(format) => format,
                Err(e) => bail!("PLASM_LOG_FORMAT: {}", e),
            },
            None => LogFormat::detect(),
        };

        Ok(Self {
            format,
            filter: var("PLASM_LOG_LEVEL").or_else(|| var("RUST_LOG")),
            include_location: var("PLASM_LOG_LOCATION")
                .is_some_and(|v| matches!(v.trim(), "1" | "true")),
            ..Self::default()
        })
    }

    /// Use `filter` unless one was already set.
    pub fn or_filter(mut self, filter: &str) -> Self {
        if self.filter.is_none() {
            self.filter = Some(filter.to_string());
        }
        self
    }

    /// Effective filter directives.
    pub fn filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(Self::DEFAULT_FILTER)
    }
}
