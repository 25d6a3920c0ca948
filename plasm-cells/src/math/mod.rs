//! Arithmetic cells.
//!
//! - [`Generate`] - Counts up by a fixed step every tick
//! - [`Increment`] - Running total of its input
//! - [`Add`] - Sum of two inputs
//! - [`Multiply`] - Input scaled by a constant factor

mod add;
mod generate;
mod increment;
mod multiply;

pub use add::Add;
pub use generate::Generate;
pub use increment::Increment;
pub use multiply::Multiply;
