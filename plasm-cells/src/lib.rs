//! Standard cell library for plasm.
//!
//! ## Arithmetic (`math::*`)
//! - [`math::Generate`] - Arithmetic sequence source
//! - [`math::Increment`] - Running total
//! - [`math::Add`] - Sum of two inputs
//! - [`math::Multiply`] - Scale by a constant factor
//!
//! ## Fan-out, fan-in and run control (`flow::*`)
//! - [`flow::Scatter`] - One value to N outputs
//! - [`flow::Gather`] - Sum of N inputs (integers or doubles)
//! - [`flow::Quitter`] - Ends the run on a stop word
//! - [`flow::SharedPass`] - Forwards a JSON document unchanged
//!
//! ## Output (`io::*`)
//! - [`io::Printer`] - Writes its input to stdout or a buffer
//!
//! [`standard_registry`] maps the type names used in YAML definitions to
//! these cells.

pub mod flow;
pub mod io;
pub mod math;
pub mod registry;

pub use flow::{Gather, Quitter, Scatter, SharedPass, gather_port, scatter_port};
pub use io::{PrintSink, Printer};
pub use math::{Add, Generate, Increment, Multiply};
pub use registry::{register_standard, standard_registry};

/// Prelude for commonly used types.
pub mod prelude {
    pub use crate::flow::{Gather, Quitter, Scatter, SharedPass};
    pub use crate::io::{PrintSink, Printer};
    pub use crate::math::{Add, Generate, Increment, Multiply};
    pub use crate::registry::standard_registry;
}
