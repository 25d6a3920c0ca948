//! Core types for plasm.
//!
//! - `CellId`: Registration index of a cell within a plasm
//! - `RunId`: Unique identifier for one scheduler run

mod ids;

pub use ids::{CellId, RunId};
