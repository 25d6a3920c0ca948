//! Output cells.

mod printer;

pub use printer::{PrintSink, Printer};
