//! Gather cell (N→1 sum).

use super::{gather_port, port_count};
use plasm_core::error::{PlasmError, Result};
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;

/// Gather cell - sums its `n` inputs.
///
/// Works on either integers or doubles; the output has the same type as
/// the inputs.
///
/// # Ports
/// - Input: "in_0000" .. "in_{n-1}" - Values to sum
/// - Output: "out" - The sum
///
/// # Example Configuration
/// ```yaml
/// cells:
///   - id: gather
///     type: Gather
///     config:
///       n: 3
///       value_type: double
/// ```
#[derive(Debug, Clone)]
pub struct Gather {
    ports: Vec<String>,
    value_type: ValueType,
}

impl Gather {
    /// Registry type name for the integer variant.
    pub const TYPE_NAME: &'static str = "Gather";

    /// Registry type name for the double variant.
    pub const DOUBLE_TYPE_NAME: &'static str = "GatherDouble";

    /// Gather `n` integers.
    pub fn int(n: usize) -> Self {
        Self::with_type(n, ValueType::Int)
    }

    /// Gather `n` doubles.
    pub fn double(n: usize) -> Self {
        Self::with_type(n, ValueType::Double)
    }

    fn with_type(n: usize, value_type: ValueType) -> Self {
        Self {
            ports: (0..n).map(gather_port).collect(),
            value_type,
        }
    }

    /// Create from configuration (`n` defaults to 2, `value_type` to `int`).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Self::from_params_or(params, ValueType::Int)
    }

    /// Create from configuration, with `value_type` defaulting to `double`.
    pub fn double_from_params(params: &CellParams) -> Result<Self> {
        Self::from_params_or(params, ValueType::Double)
    }

    fn from_params_or(params: &CellParams, default_type: ValueType) -> Result<Self> {
        let n = port_count(params, Self::TYPE_NAME)?;
        let value_type = match params.get_string("value_type") {
            None => default_type,
            Some(raw) => raw
                .parse::<ValueType>()
                .map_err(|e| PlasmError::cell_config(Self::TYPE_NAME, e))?,
        };
        match value_type {
            ValueType::Int | ValueType::Double => Ok(Self::with_type(n, value_type)),
            other => Err(PlasmError::cell_config(
                Self::TYPE_NAME,
                format!("'value_type' must be int or double, got {}", other),
            )),
        }
    }

    /// Element type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl Cell for Gather {
    fn info(&self) -> CellInfo {
        let type_name = match self.value_type {
            ValueType::Double => Self::DOUBLE_TYPE_NAME,
            _ => Self::TYPE_NAME,
        };
        let inputs = self
            .ports
            .iter()
            .map(|name| Port::input(name.as_str(), self.value_type))
            .collect();

        CellInfo::new(type_name)
            .with_description("Sums all inputs")
            .with_inputs(inputs)
            .with_outputs(vec![
                Port::output("out", self.value_type).with_description("The sum of all inputs"),
            ])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        if self.value_type == ValueType::Double {
            let mut sum = 0.0;
            for port in &self.ports {
                sum += inputs.get::<f64>(port)?;
            }
            outputs.set("out", sum)?;
        } else {
            let mut sum: i64 = 0;
            for port in &self.ports {
                let x: i64 = inputs.get(port)?;
                sum = sum
                    .checked_add(x)
                    .ok_or_else(|| PlasmError::invalid_input(port.as_str(), "integer sum overflows"))?;
            }
            outputs.set("out", sum)?;
        }
        Ok(CellStatus::Continue)
    }
}
