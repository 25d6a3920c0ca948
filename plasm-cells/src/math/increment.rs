//! Increment cell (running total).

use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;

/// Increment cell - accumulates its input.
///
/// Every tick adds `in` to an internal total (initially `start`) and
/// publishes the total on `out`. The total lives in the cell, so it carries
/// over between scheduler runs.
///
/// # Ports
/// - Input: "in" - Amount to add
/// - Output: "out" - Running total
/// - Output: "count" - Increments applied so far
#[derive(Debug, Clone, Default)]
pub struct Increment {
    total: f64,
    ticks: u64,
}

impl Increment {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Increment";

    /// Create an accumulator starting at `start`.
    pub fn new(start: f64) -> Self {
        Self {
            total: start,
            ticks: 0,
        }
    }

    /// Create from configuration (`start` defaults to 0).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Ok(Self::new(params.f64_or(Self::TYPE_NAME, "start", 0.0)?))
    }
}

impl Cell for Increment {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Adds its input to a running total")
            .with_inputs(vec![Port::input("in", ValueType::Double)])
            .with_outputs(vec![
                Port::output("out", ValueType::Double),
                Port::output("count", ValueType::Int).with_default(0_i64),
            ])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let amount: f64 = inputs.get("in")?;
        self.total += amount;
        self.ticks += 1;
        outputs.set("out", self.total)?;
        outputs.set("count", self.ticks as i64)?;
        Ok(CellStatus::Continue)
    }

    fn shutdown(&mut self) {
        tracing::debug!(ticks = self.ticks, total = self.total, "Increment finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_input() {
        let mut cell = Increment::new(10.0);
        let info = cell.info();
        let mut inputs = Tendrils::from_ports(&info.inputs).unwrap();
        let mut outputs = Tendrils::from_ports(&info.outputs).unwrap();

        for x in [1.0, 2.0, 3.0] {
            inputs.set("in", x).unwrap();
            cell.process(&inputs, &mut outputs).unwrap();
        }

        assert_eq!(outputs.get::<f64>("out").unwrap(), 16.0);
        assert_eq!(outputs.get::<i64>("count").unwrap(), 3);
    }

    #[test]
    fn unset_input_fails() {
        let mut cell = Increment::default();
        let info = cell.info();
        let inputs = Tendrils::from_ports(&info.inputs).unwrap();
        let mut outputs = Tendrils::from_ports(&info.outputs).unwrap();
        assert!(cell.process(&inputs, &mut outputs).is_err());
        assert_eq!(outputs.get::<i64>("count").unwrap(), 0);
    }
}
