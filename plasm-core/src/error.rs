//! Error types for plasm.
//!
//! Every error carries a stable code and the identifiers needed to locate
//! the failure (cell id, port name, tick number).

use crate::types::CellId;
use crate::value::ValueType;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for plasm operations.
#[derive(Error, Debug)]
pub enum PlasmError {
    // =========================================================================
    // Construction Errors (E100-E199)
    // =========================================================================
    /// Cell id is not registered in this plasm.
    #[error("E101: Cell {cell} is not registered in this plasm")]
    UnknownCell {
        /// The unknown cell.
        cell: CellId,
    },

    /// Named port is not declared on the cell.
    #[error("E102: Cell {cell} ({cell_type}) has no {direction} port '{port}'")]
    UnknownPort {
        /// The cell that was queried.
        cell: CellId,
        /// Type name of the cell.
        cell_type: String,
        /// The missing port name.
        port: String,
        /// "input" or "output".
        direction: &'static str,
    },

    /// Declared value types of two ports, or of a port and a value, differ.
    #[error("E103: Type mismatch on '{port}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// The port where the mismatch was detected (`cell.port` form for connections).
        port: String,
        /// The type the port declares.
        expected: ValueType,
        /// The type that was offered.
        actual: ValueType,
    },

    /// Destination input port already has an incoming connection.
    #[error("E104: Input port {cell}.{port} is already connected to {bound_from}")]
    PortAlreadyBound {
        /// The destination cell.
        cell: CellId,
        /// The destination port.
        port: String,
        /// The `cell.port` that currently feeds it.
        bound_from: String,
    },

    /// A port name was declared twice on the same side of a cell.
    #[error("E105: Port '{port}' declared twice")]
    DuplicatePort {
        /// The duplicated port name.
        port: String,
    },

    /// A tendril set was asked for a port it does not declare.
    #[error("E106: Port '{port}' is not declared")]
    UndeclaredPort {
        /// The undeclared port name.
        port: String,
    },

    // =========================================================================
    // Ordering Errors (E200-E299)
    // =========================================================================
    /// The connection graph contains a same-tick cycle.
    #[error("E201: Cycle detected involving cells: {cells:?}")]
    CyclicGraph {
        /// Cells that could not be ordered.
        cells: Vec<CellId>,
    },

    /// A required input port is neither connected nor defaulted.
    #[error("E202: Required input {cell}.{port} is not connected and has no default")]
    UnboundInput {
        /// The cell owning the port.
        cell: CellId,
        /// The unbound port.
        port: String,
    },

    // =========================================================================
    // Configuration Errors (E300-E399)
    // =========================================================================
    /// Invalid scheduler or run configuration.
    #[error("E301: Invalid configuration '{field}': {cause}")]
    InvalidConfiguration {
        /// The offending field.
        field: String,
        /// Why the value is rejected.
        cause: String,
    },

    // =========================================================================
    // Run Errors (E400-E499)
    // =========================================================================
    /// A cell failed during `process`; the run stopped.
    #[error(
        "E401: Cell {cell} ({name}) failed on tick {tick} after {completed_ticks} completed ticks: {cause}"
    )]
    ProcessError {
        /// The failing cell.
        cell: CellId,
        /// Display name of the failing cell.
        name: String,
        /// Tick (1-based, local to the run) in which the failure happened.
        tick: u64,
        /// Ticks of this run that completed before the failure.
        completed_ticks: u64,
        /// The underlying failure.
        cause: String,
    },

    /// A cell read an input port that holds no value.
    #[error("E402: Input '{port}' has no value")]
    MissingInput {
        /// The unset port.
        port: String,
    },

    /// A cell rejected the value on one of its inputs.
    #[error("E403: Invalid value on '{port}': {cause}")]
    InvalidInput {
        /// The port carrying the bad value.
        port: String,
        /// Why it was rejected.
        cause: String,
    },

    /// A cell panicked inside `process`.
    #[error("E404: Cell panicked: {message}")]
    CellPanic {
        /// The panic payload, when it was a string.
        message: String,
    },

    // =========================================================================
    // Registry Errors (E500-E599)
    // =========================================================================
    /// No factory registered for a cell type.
    #[error("E501: Unknown cell type '{cell_type}'")]
    UnknownCellType {
        /// The requested type name.
        cell_type: String,
    },

    /// A cell factory rejected its configuration.
    #[error("E502: Invalid configuration for cell '{cell}': {cause}")]
    CellConfig {
        /// Cell id or type name.
        cell: String,
        /// Why the configuration is rejected.
        cause: String,
    },

    // =========================================================================
    // I/O Errors (E600-E699)
    // =========================================================================
    /// Serialization/deserialization error.
    #[error("E601: Serialization error: {0}")]
    Serialization(
        /// The serialization error message.
        String,
    ),

    /// File I/O error.
    #[error("E602: I/O error at {path}: {cause}")]
    Io {
        /// The path where the I/O error occurred.
        path: PathBuf,
        /// Description of the I/O error.
        cause: String,
    },
}

impl PlasmError {
    /// Get the error code (e.g., "E101").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCell { .. } => "E101",
            Self::UnknownPort { .. } => "E102",
            Self::TypeMismatch { .. } => "E103",
            Self::PortAlreadyBound { .. } => "E104",
            Self::DuplicatePort { .. } => "E105",
            Self::UndeclaredPort { .. } => "E106",
            Self::CyclicGraph { .. } => "E201",
            Self::UnboundInput { .. } => "E202",
            Self::InvalidConfiguration { .. } => "E301",
            Self::ProcessError { .. } => "E401",
            Self::MissingInput { .. } => "E402",
            Self::InvalidInput { .. } => "E403",
            Self::CellPanic { .. } => "E404",
            Self::UnknownCellType { .. } => "E501",
            Self::CellConfig { .. } => "E502",
            Self::Serialization(_) => "E601",
            Self::Io { .. } => "E602",
        }
    }

    /// Check if this error is raised while assembling a plasm.
    #[must_use]
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCell { .. }
                | Self::UnknownPort { .. }
                | Self::TypeMismatch { .. }
                | Self::PortAlreadyBound { .. }
                | Self::DuplicatePort { .. }
                | Self::UndeclaredPort { .. }
        )
    }

    /// Check if this error aborts a scheduler run.
    #[must_use]
    pub fn is_run_error(&self) -> bool {
        matches!(
            self,
            Self::CyclicGraph { .. }
                | Self::UnboundInput { .. }
                | Self::InvalidConfiguration { .. }
                | Self::ProcessError { .. }
        )
    }

    /// Number of ticks the failing run completed, for run errors.
    ///
    /// Errors raised before any tick starts report zero.
    #[must_use]
    pub fn completed_ticks(&self) -> Option<u64> {
        match self {
            Self::ProcessError {
                completed_ticks, ..
            } => Some(*completed_ticks),
            Self::CyclicGraph { .. }
            | Self::UnboundInput { .. }
            | Self::InvalidConfiguration { .. } => Some(0),
            _ => None,
        }
    }

    /// Shorthand for [`PlasmError::InvalidInput`].
    pub fn invalid_input(port: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::InvalidInput {
            port: port.into(),
            cause: cause.into(),
        }
    }

    /// Shorthand for [`PlasmError::CellConfig`].
    pub fn cell_config(cell: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::CellConfig {
            cell: cell.into(),
            cause: cause.into(),
        }
    }
}

/// Result type alias using `PlasmError`.
pub type Result<T> = std::result::Result<T, PlasmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_correct() {
        let err = PlasmError::UnknownCell {
            cell: CellId::new(3),
        };
        assert_eq!(err.code(), "E101");

        let err = PlasmError::CyclicGraph {
            cells: vec![CellId::new(1), CellId::new(2)],
        };
        assert_eq!(err.code(), "E201");
    }

    #[test]
    fn error_display() {
        let err = PlasmError::ProcessError {
            cell: CellId::new(5),
            name: "adder".to_string(),
            tick: 3,
            completed_ticks: 2,
            cause: "boom".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("E401"));
        assert!(msg.contains("cell_5"));
        assert!(msg.contains("tick 3"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn construction_errors() {
        assert!(
            PlasmError::TypeMismatch {
                port: "add.left".to_string(),
                expected: ValueType::Double,
                actual: ValueType::String,
            }
            .is_construction_error()
        );

        assert!(!PlasmError::CyclicGraph { cells: vec![] }.is_construction_error());
    }

    #[test]
    fn run_errors_report_completed_ticks() {
        let err = PlasmError::CyclicGraph { cells: vec![] };
        assert!(err.is_run_error());
        assert_eq!(err.completed_ticks(), Some(0));

        let err = PlasmError::ProcessError {
            cell: CellId::new(0),
            name: "gen".to_string(),
            tick: 4,
            completed_ticks: 3,
            cause: "bad".to_string(),
        };
        assert_eq!(err.completed_ticks(), Some(3));

        assert_eq!(
            PlasmError::MissingInput {
                port: "in".to_string()
            }
            .completed_ticks(),
            None
        );
    }
}
