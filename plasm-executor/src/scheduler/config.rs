//! Scheduler configuration.

use plasm_core::error::{PlasmError, Result};

/// Configuration for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Worker threads used by [`Scheduler::execute_default`](super::Scheduler::execute_default).
    pub default_threads: usize,
    /// Prefix for worker thread names; the worker index is appended.
    pub thread_name_prefix: String,
    /// Stack size for worker threads in bytes. `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_threads: available_threads(),
            thread_name_prefix: "plasm-worker".to_string(),
            stack_size: None,
        }
    }
}

impl SchedulerConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `PLASM_THREADS`: Default worker thread count (at least 1)
    /// - `PLASM_THREAD_NAME`: Worker thread name prefix
    /// - `PLASM_STACK_SIZE`: Worker stack size in bytes
    ///
    /// Unset variables keep their defaults; malformed values are rejected
    /// with `InvalidConfiguration`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(threads) = env_var("PLASM_THREADS") {
            let threads = parse_usize("PLASM_THREADS", &threads)?;
            if threads == 0 {
                return Err(PlasmError::InvalidConfiguration {
                    field: "PLASM_THREADS".to_string(),
                    cause: "must be at least 1".to_string(),
                });
            }
            config.default_threads = threads;
        }

        if let Some(prefix) = env_var("PLASM_THREAD_NAME") {
            config.thread_name_prefix = prefix;
        }

        if let Some(stack) = env_var("PLASM_STACK_SIZE") {
            config.stack_size = Some(parse_usize("PLASM_STACK_SIZE", &stack)?);
        }

        Ok(config)
    }

    /// Set the default worker thread count.
    pub fn with_default_threads(mut self, threads: usize) -> Self {
        self.default_threads = threads.max(1);
        self
    }

    /// Set the worker thread name prefix.
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker stack size in bytes.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_usize(field: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| PlasmError::InvalidConfiguration {
            field: field.to_string(),
            cause: format!("'{}': {}", raw, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SchedulerConfig::default();
        assert!(config.default_threads >= 1);
        assert_eq!(config.thread_name_prefix, "plasm-worker");
        assert_eq!(config.stack_size, None);
    }

    #[test]
    fn builder_clamps_threads() {
        let config = SchedulerConfig::default()
            .with_default_threads(0)
            .with_thread_name_prefix("cells")
            .with_stack_size(1 << 20);
        assert_eq!(config.default_threads, 1);
        assert_eq!(config.thread_name_prefix, "cells");
        assert_eq!(config.stack_size, Some(1 << 20));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = parse_usize("PLASM_THREADS", "many").unwrap_err();
        assert!(matches!(err, PlasmError::InvalidConfiguration { .. }));
        assert_eq!(parse_usize("PLASM_STACK_SIZE", " 4096 ").unwrap(), 4096);
    }
}
