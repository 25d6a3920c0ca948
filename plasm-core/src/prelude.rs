//! Prelude for convenient imports.
//!
//! ```ignore
//! use plasm_core::prelude::*;
//! ```

// Core types
pub use crate::types::{CellId, RunId};

// Error handling
pub use crate::error::{PlasmError, Result};

// Definitions
pub use crate::definition::{CellDefinition, ConnectionDefinition, PlasmDefinition};

// Values and ports
pub use crate::tendrils::{Tendril, Tendrils};
pub use crate::value::{PortValue, Value, ValueType};

// Traits
pub use crate::traits::{
    Cell, CellFactory, CellInfo, CellParams, CellRegistry, CellStatus, Port, PortDirection,
};
