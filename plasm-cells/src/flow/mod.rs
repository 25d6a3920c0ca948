//! Fan-out, fan-in and run control cells.
//!
//! - [`Scatter`] - Writes one value to N outputs
//! - [`Gather`] - Sums N inputs into one output
//! - [`Quitter`] - Ends the run when it sees a stop word
//! - [`SharedPass`] - Forwards a shared JSON document

use plasm_core::error::{PlasmError, Result};
use plasm_core::traits::CellParams;

mod gather;
mod quitter;
mod scatter;
mod shared_pass;

pub use gather::Gather;
pub use quitter::Quitter;
pub use scatter::Scatter;
pub use shared_pass::SharedPass;

/// Port name for the `index`th scattered output.
pub fn scatter_port(index: usize) -> String {
    format!("out_{:04}", index)
}

/// Port name for the `index`th gathered input.
pub fn gather_port(index: usize) -> String {
    format!("in_{:04}", index)
}

/// The `n` parameter shared by scatter and gather (default 2).
fn port_count(params: &CellParams, cell: &str) -> Result<usize> {
    let n = params.i64_or(cell, "n", 2)?;
    usize::try_from(n).map_err(|_| {
        PlasmError::cell_config(cell, format!("'n' must be non-negative, got {}", n))
    })
}
