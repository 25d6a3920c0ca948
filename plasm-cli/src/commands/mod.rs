//! CLI command implementations.

pub mod demo;
pub mod run;
pub mod version;
pub mod viz;
