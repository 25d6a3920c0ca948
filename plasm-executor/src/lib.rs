//! Plasm Executor - wave-parallel tick execution.
//!
//! This crate provides the execution infrastructure for plasm:
//! - [`Plasm`](scheduler::Plasm) graph with connection validation
//! - Topological ordering, wave partitioning and cycle detection
//! - [`Scheduler`](scheduler::Scheduler) running waves on a worker pool
//! - YAML plasm loader
//! - Logging setup

#![warn(missing_docs)]

pub mod loader;
pub mod observability;
pub mod scheduler;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::loader::{LoadedPlasm, LoaderError, PlasmBuilder, PlasmLoader};
    pub use crate::observability::{
        LogFormat, TracingConfig, TracingGuard, init_tracing, verbosity_filter,
    };
    pub use crate::scheduler::{
        Connection, Plasm, RunStats, Schedule, Scheduler, SchedulerConfig, SchedulerState,
    };
}
