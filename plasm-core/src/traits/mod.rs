//! Core traits for plasm components.
//!
//! - `Cell`: The unit of computation in a plasm
//! - `CellFactory`: Builds cells from YAML parameters

mod cell;
mod registry;

pub use cell::{Cell, CellInfo, CellStatus, Port, PortDirection};
pub use registry::{CellFactory, CellParams, CellRegistry};
