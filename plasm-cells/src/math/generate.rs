//! Generate cell (arithmetic sequence source).

use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;

/// Generate cell - emits `start`, `start + step`, `start + 2 * step`, ...
///
/// The output is seeded with `start - step` so that the first tick yields
/// `start`.
///
/// # Ports
/// - Output: "out" - Current value of the sequence
///
/// # Example Configuration
/// ```yaml
/// cells:
///   - id: gen
///     type: Generate
///     config:
///       step: 1.0
///       start: 0.0
/// ```
#[derive(Debug, Clone)]
pub struct Generate {
    step: f64,
    start: f64,
}

impl Generate {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Generate";

    /// Create a generator.
    pub fn new(step: f64, start: f64) -> Self {
        Self { step, start }
    }

    /// Create from configuration (`step` defaults to 2, `start` to 0).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Ok(Self::new(
            params.f64_or(Self::TYPE_NAME, "step", 2.0)?,
            params.f64_or(Self::TYPE_NAME, "start", 0.0)?,
        ))
    }
}

impl Default for Generate {
    fn default() -> Self {
        Self::new(2.0, 0.0)
    }
}

impl Cell for Generate {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Generates an arithmetic sequence")
            .with_outputs(vec![
                Port::output("out", ValueType::Double)
                    .with_default(self.start - self.step)
                    .with_description("Current value"),
            ])
    }

    fn process(&mut self, _inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let current: f64 = outputs.get("out")?;
        outputs.set("out", current + self.step)?;
        Ok(CellStatus::Continue)
    }
}
