//! Add cell.

use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellStatus, Port};
use plasm_core::value::ValueType;

/// Add cell - `out = left + right`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl Add {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Add";
}

impl Cell for Add {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Adds two numbers")
            .with_inputs(vec![
                Port::input("left", ValueType::Double),
                Port::input("right", ValueType::Double),
            ])
            .with_outputs(vec![Port::output("out", ValueType::Double)])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let left: f64 = inputs.get("left")?;
        let right: f64 = inputs.get("right")?;
        outputs.set("out", left + right)?;
        Ok(CellStatus::Continue)
    }
}
