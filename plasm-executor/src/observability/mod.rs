//! Logging setup for plasm binaries and tests.
//!
//! Log output always goes to stderr so that cell output on stdout (the
//! `Printer` cell, DOT dumps) stays clean.
//!
//! # Configuration
//!
//! - `PLASM_LOG_FORMAT`: `json`, `pretty` or `compact` (detected when unset)
//! - `PLASM_LOG_LEVEL`, then `RUST_LOG`: filter directives
//! - `PLASM_LOG_LOCATION`: `1` or `true` adds file and line
//!
//! ```ignore
//! use plasm_executor::observability::{TracingConfig, init_tracing, verbosity_filter};
//!
//! let config = TracingConfig::from_env()?.or_filter(verbosity_filter(1));
//! let _guard = init_tracing(config)?;
//! ```

mod config;
mod tracing_setup;

pub use config::{LogFormat, TracingConfig, verbosity_filter};
pub use tracing_setup::{TracingGuard, init_tracing};
