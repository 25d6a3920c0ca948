//! Multiply cell.

use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;

// Default factor, not an approximation of pi.
#[allow(clippy::approx_constant)]
const DEFAULT_FACTOR: f64 = 3.14;

/// Multiply cell - `out = in * factor`.
///
/// # Example Configuration
/// ```yaml
/// cells:
///   - id: scale
///     type: Multiply
///     config:
///       factor: 2.0
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Multiply {
    factor: f64,
}

impl Multiply {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Multiply";

    /// Create a multiplier.
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Create from configuration (`factor` defaults to 3.14).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Ok(Self::new(params.f64_or(Self::TYPE_NAME, "factor", DEFAULT_FACTOR)?))
    }
}

impl Default for Multiply {
    fn default() -> Self {
        Self::new(DEFAULT_FACTOR)
    }
}

impl Cell for Multiply {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Multiplies its input by a constant factor")
            .with_inputs(vec![Port::input("in", ValueType::Double)])
            .with_outputs(vec![Port::output("out", ValueType::Double)])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let x: f64 = inputs.get("in")?;
        outputs.set("out", x * self.factor)?;
        Ok(CellStatus::Continue)
    }
}
