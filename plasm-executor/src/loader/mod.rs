#![allow(clippy::module_inception)]

//! Plasm loader for converting YAML definitions into runnable plasms.
//!
//! Cells are created through a [`CellRegistry`](plasm_core::CellRegistry)
//! and inserted in document order, which fixes the tie-break order used by
//! the scheduler.
//!
//! # Example
//!
//! ```ignore
//! use plasm_executor::loader::PlasmLoader;
//!
//! let loader = PlasmLoader::new(plasm_cells::standard_registry());
//! let loaded = loader.load_yaml(r#"
//! cells:
//!   - id: gen
//!     type: Generate
//!   - id: printer
//!     type: Printer
//! connections:
//!   - from: gen
//!     to: printer
//! "#)?;
//! let mut scheduler = Scheduler::new(loaded.plasm);
//! ```

mod builder;
mod loader;

pub use builder::PlasmBuilder;
pub use loader::{LoadedPlasm, LoaderError, PlasmLoader};
