//! Quitter cell (stop word).

use plasm_core::error::Result;
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellParams, CellStatus, Port};
use plasm_core::value::ValueType;

/// Quitter cell - asks the scheduler to stop when its input equals the stop word.
///
/// The tick in which the stop word arrives still completes.
#[derive(Debug, Clone)]
pub struct Quitter {
    stop_word: String,
}

impl Quitter {
    /// Registry type name.
    pub const TYPE_NAME: &'static str = "Quitter";

    /// Create a quitter listening for `stop_word`.
    pub fn new(stop_word: impl Into<String>) -> Self {
        Self {
            stop_word: stop_word.into(),
        }
    }

    /// Create from configuration (`str` defaults to "EXIT").
    pub fn from_params(params: &CellParams) -> Result<Self> {
        Ok(Self::new(params.string_or(Self::TYPE_NAME, "str", "EXIT")?))
    }
}

impl Default for Quitter {
    fn default() -> Self {
        Self::new("EXIT")
    }
}

impl Cell for Quitter {
    fn info(&self) -> CellInfo {
        CellInfo::new(Self::TYPE_NAME)
            .with_description("Ends the run on a stop word")
            .with_inputs(vec![
                Port::input("in", ValueType::String)
                    .with_default("")
                    .with_description("The string to listen to"),
            ])
    }

    fn process(&mut self, inputs: &Tendrils, _outputs: &mut Tendrils) -> Result<CellStatus> {
        let word: String = inputs.get("in")?;
        if word == self.stop_word {
            tracing::debug!(stop_word = %self.stop_word, "Stop word received");
            return Ok(CellStatus::Quit);
        }
        Ok(CellStatus::Continue)
    }
}
