//! Cell trait and related types.

use crate::error::Result;
use crate::tendrils::Tendrils;
use crate::value::{Value, ValueType};

/// Direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Input port.
    Input,
    /// Output port.
    Output,
}

impl PortDirection {
    /// Lower-case direction name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// A port declared by a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Port name (e.g., "in", "out", "left").
    pub name: String,
    /// Port direction.
    pub direction: PortDirection,
    /// Declared value type.
    pub value_type: ValueType,
    /// Value the port holds before anything is written to it.
    pub default: Option<Value>,
    /// Whether an input must be connected or defaulted before the graph can run.
    pub required: bool,
    /// Description of the port.
    pub description: String,
}

impl Port {
    /// Create a required input port.
    pub fn input(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::named(name, PortDirection::Input, value_type)
    }

    /// Create an output port.
    pub fn output(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::named(name, PortDirection::Output, value_type)
    }

    /// Create a named port.
    pub fn named(name: impl Into<String>, direction: PortDirection, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            direction,
            value_type,
            default: None,
            required: direction == PortDirection::Input,
            description: String::new(),
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the port as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the port description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Whether an unconnected input would leave the cell without a value it needs.
    pub fn needs_binding(&self) -> bool {
        self.direction == PortDirection::Input && self.required && self.default.is_none()
    }
}

/// Metadata about a cell type.
#[derive(Debug, Clone)]
pub struct CellInfo {
    /// Type name (e.g., "Generate", "Add").
    pub type_name: String,
    /// Description of what the cell does.
    pub description: String,
    /// Input ports.
    pub inputs: Vec<Port>,
    /// Output ports.
    pub outputs: Vec<Port>,
}

impl CellInfo {
    /// Create new cell info with no ports.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set input ports.
    pub fn with_inputs(mut self, inputs: Vec<Port>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set output ports.
    pub fn with_outputs(mut self, outputs: Vec<Port>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Get an input port by name.
    pub fn get_input(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Get an output port by name.
    pub fn get_output(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.name == name)
    }
}

/// What a cell asks of the scheduler after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStatus {
    /// Keep ticking.
    #[default]
    Continue,
    /// Finish the current tick, then end the run.
    Quit,
}

/// The core trait for all plasm cells.
///
/// A cell declares a fixed set of ports through [`Cell::info`] and is invoked
/// once per tick through [`Cell::process`]. It may only write its own
/// outputs and its own fields; everything else reaches it through inputs.
///
/// # Example
///
/// ```ignore
/// use plasm_core::prelude::*;
///
/// struct Doubler;
///
/// impl Cell for Doubler {
///     fn info(&self) -> CellInfo {
///         CellInfo::new("Doubler")
///             .with_inputs(vec![Port::input("in", ValueType::Double)])
///             .with_outputs(vec![Port::output("out", ValueType::Double)])
///     }
///
///     fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
///         let x: f64 = inputs.get("in")?;
///         outputs.set("out", x * 2.0)?;
///         Ok(CellStatus::Continue)
///     }
/// }
/// ```
pub trait Cell: Send {
    /// Get metadata and port declarations. Must return the same ports on every call.
    fn info(&self) -> CellInfo;

    /// Run one tick.
    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus>;

    /// Called when the owning plasm is dropped.
    fn shutdown(&mut self) {}
}
