//! Scatter cell (1→N fan-out).

use super::{port_count, scatter_port};
use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;

/// Scatter cell - writes `x` to each of its `n` outputs every tick.
///
/// # Ports
/// - Output: "out_0000" .. "out_{n-1}" - The scattered value
///
/// # Example Configuration
/// ```yaml
/// cells:
///   - id: scatter
///     type: Scatter
///     config:
///       n: 3
///       x: 13
/// ```
#[derive(Debug, Clone)]
pub struct Scatter {
    ports: Vec<String>,
    x: i64,
}

impl Scatter {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Scatter";

    /// Create a scatter with `n` outputs carrying `x`.
    pub fn new(n: usize, x: i64) -> Self {
        Self {
            ports: (0..n).map(scatter_port).collect(),
            x,
        }
    }

    /// Create from configuration (`n` defaults to 2, `x` to 13).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        let n = port_count(params, Self::TYPE_NAME)?;
        let x = params.i64_or(Self::TYPE_NAME, "x", 13)?;
        Ok(Self::new(n, x))
    }
}

impl Default for Scatter {
    fn default() -> Self {
        Self::new(2, 13)
    }
}

impl Cell for Scatter {
    fn info(&self) -> CellInfo {
        let outputs = self
            .ports
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Port::output(name.as_str(), ValueType::Int)
                    .with_description(format!("Scattered value #{}", i))
            })
            .collect();

        CellInfo::new(Self::TYPE_NAME)
            .with_description("Writes one value to N outputs")
            .with_outputs(outputs)
    }

    fn process(&mut self, _inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        for port in &self.ports {
            outputs.set(port, self.x)?;
        }
        Ok(CellStatus::Continue)
    }
}
