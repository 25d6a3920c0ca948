//! SharedPass cell (pass-through of a shared document).

use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;
use serde_json::Value as JsonValue;

/// SharedPass cell - forwards a JSON document unchanged.
///
/// The integer view of the document is published on `value`, or -1 when
/// the document is not an integer.
///
/// # Ports
/// - Input: "input" - Document to forward, defaults to `x`
/// - Output: "output" - The same document
/// - Output: "value" - Its integer view
#[derive(Debug, Clone)]
pub struct SharedPass {
    initial: i64,
}

impl SharedPass {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "SharedPass";

    /// Create a pass-through whose unconnected input holds `initial`.
    pub fn new(initial: i64) -> Self {
        Self { initial }
    }

    /// Create from configuration (`x` defaults to -1).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Ok(Self::new(params.i64_or(Self::TYPE_NAME, "x", -1)?))
    }
}

impl Default for SharedPass {
    fn default() -> Self {
        Self::new(-1)
    }
}

impl Cell for SharedPass {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Forwards a shared document unchanged")
            .with_inputs(vec![
                Port::input("input", ValueType::Json)
                    .with_default(JsonValue::from(self.initial))
                    .with_description("A pass through"),
            ])
            .with_outputs(vec![
                Port::output("output", ValueType::Json).with_default(JsonValue::from(-1)),
                Port::output("value", ValueType::Int).with_default(-1_i64),
            ])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let shared: JsonValue = inputs.get("input")?;
        let value = shared.as_i64().unwrap_or(-1);
        outputs.set("output", shared)?;
        outputs.set("value", value)?;
        Ok(CellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(cell: &mut SharedPass, input: Option<JsonValue>) -> Tendrils {
        let info = cell.info();
        let mut inputs = Tendrils::from_ports(&info.inputs).unwrap();
        let mut outputs = Tendrils::from_ports(&info.outputs).unwrap();
        if let Some(input) = input {
            inputs.set("input", input).unwrap();
        }
        cell.process(&inputs, &mut outputs).unwrap();
        outputs
    }

    #[test]
    fn unconnected_input_forwards_x() {
        let params = CellParams::new(serde_yaml::from_str("x: 7").unwrap());
        let mut cell = SharedPass::from_params(&params).unwrap();
        let outputs = run(&mut cell, None);
        assert_eq!(outputs.get::<JsonValue>("output").unwrap(), json!(7));
        assert_eq!(outputs.get::<i64>("value").unwrap(), 7);
    }

    #[test]
    fn documents_pass_through_untouched() {
        let doc = json!({"frame": 3, "tags": ["a", "b"]});
        let outputs = run(&mut SharedPass::default(), Some(doc.clone()));
        assert_eq!(outputs.get::<JsonValue>("output").unwrap(), doc);
        assert_eq!(outputs.get::<i64>("value").unwrap(), -1);
    }
}
