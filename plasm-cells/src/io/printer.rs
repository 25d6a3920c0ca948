//! Printer cell.

use parking_lot::Mutex;
use plasm_core::error::{PlasmError, Result};
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;
use std::io::Write;
use std::sync::Arc;

/// Where a [`Printer`] writes its lines.
#[derive(Debug, Clone, Default)]
pub enum PrintSink {
    /// Standard output.
    #[default]
    Stdout,
    /// Shared in-memory buffer, one entry per line.
    Buffer(Arc<Mutex<Vec<String>>>),
}

impl PrintSink {
    /// A fresh buffer sink and a handle to read it back.
    pub fn buffer() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (Self::Buffer(Arc::clone(&lines)), lines)
    }

    fn write_line(&self, line: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", line).map_err(|e| PlasmError::Io {
                    path: "<stdout>".into(),
                    cause: e.to_string(),
                })
            }
            Self::Buffer(lines) => {
                lines.lock().push(line.to_string());
                Ok(())
            }
        }
    }
}

/// Printer cell - writes its input, one line per tick.
///
/// # Ports
/// - Input: "in" - Any value; formatted with its `Display` form
///
/// # Example Configuration
/// ```yaml
/// cells:
///   - id: printer
///     type: Printer
///     config:
///       prefix: "sum: "
/// ```
#[derive(Debug, Clone, Default)]
pub struct Printer {
    prefix: String,
    sink: PrintSink,
}

impl Printer {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Printer";

    /// Create a printer writing to stdout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a printer writing to `sink`.
    pub fn with_sink(sink: PrintSink) -> Self {
        Self {
            prefix: String::new(),
            sink,
        }
    }

    /// Set a prefix for every line.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Create from configuration (optional `prefix`).
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Ok(Self::new().with_prefix(params.string_or(Self::TYPE_NAME, "prefix", "")?))
    }
}

impl Cell for Printer {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Prints its input")
            .with_inputs(vec![
                Port::input("in", ValueType::Any).with_description("The value to print"),
            ])
    }

    fn process(&mut self, inputs: &Tendrils, _outputs: &mut Tendrils) -> Result<CellStatus> {
        let value = inputs
            .get_value("in")
            .ok_or_else(|| PlasmError::MissingInput {
                port: "in".to_string(),
            })?;
        let line = format!("{}{}", self.prefix, value);
        tracing::debug!(line = %line, "Printer output");
        self.sink.write_line(&line)?;
        Ok(CellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasm_core::value::Value;

    #[test]
    fn prints_to_buffer() {
        let (sink, lines) = PrintSink::buffer();
        let mut cell = Printer::with_sink(sink).with_prefix("v=");
        let info = cell.info();
        let mut inputs = Tendrils::from_ports(&info.inputs).unwrap();

        inputs.set("in", 6.0).unwrap();
        cell.process(&inputs, &mut Tendrils::new()).unwrap();
        inputs.set_value("in", Value::from("EXIT")).unwrap();
        cell.process(&inputs, &mut Tendrils::new()).unwrap();

        assert_eq!(*lines.lock(), vec!["v=6".to_string(), "v=EXIT".to_string()]);
    }

    #[test]
    fn unset_input_fails() {
        let mut cell = Printer::with_sink(PrintSink::buffer().0);
        let info = cell.info();
        let inputs = Tendrils::from_ports(&info.inputs).unwrap();
        assert!(matches!(
            cell.process(&inputs, &mut Tendrils::new()),
            Err(PlasmError::MissingInput { .. })
        ));
    }
}
