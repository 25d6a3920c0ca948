//! Plasm graph, wave scheduler and execution engine.
//!
//! This module provides the core scheduling and execution infrastructure:
//! - [`Plasm`] - graph of cells and their connections
//! - [`Scheduler`] - tick execution engine
//! - Topological ordering with cycle detection and wave partitioning
//! - Graphviz DOT rendering via [`Plasm::viz`]

mod config;
mod executor;
mod graph;
mod pool;
mod viz;

pub use config::SchedulerConfig;
pub use executor::{RunStats, Scheduler, SchedulerState};
pub use graph::{Connection, Plasm, Schedule};
