//! Plasm Core Library
//!
//! Foundational types and traits for the plasm dataflow engine.
//!
//! # Key Components
//!
//! - **Values**: Typed port values ([`Value`], [`ValueType`], [`PortValue`])
//! - **Tendrils**: Per-port value slots owned by each cell
//! - **Traits**: The [`Cell`] capability and the [`CellRegistry`] of factories
//! - **Definitions**: YAML plasm descriptions ([`PlasmDefinition`])
//! - **Errors**: [`PlasmError`] with stable error codes
//!
//! # Example
//!
//! ```ignore
//! use plasm_core::prelude::*;
//!
//! let mut outputs = Tendrils::from_ports(&[Port::output("out", ValueType::Double)])?;
//! outputs.set("out", 1.0)?;
//! assert_eq!(outputs.get::<f64>("out")?, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod definition;
pub mod error;
pub mod prelude;
pub mod tendrils;
pub mod traits;
pub mod types;
pub mod value;

// Re-export key types at crate root for convenience
pub use definition::{CellDefinition, ConnectionDefinition, PlasmDefinition};
pub use error::{PlasmError, Result};
pub use tendrils::{Tendril, Tendrils};
pub use traits::{
    Cell, CellFactory, CellInfo, CellParams, CellRegistry, CellStatus, Port, PortDirection,
};
pub use types::{CellId, RunId};
pub use value::{PortValue, Value, ValueType};
