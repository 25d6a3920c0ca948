//! Plasm definitions as written in YAML.
//!
//! # Example
//!
//! ```yaml
//! name: bigplasm
//! cells:
//!   - id: gen
//!     type: Generate
//!     config: { step: 1.0, start: 0.0 }
//!   - id: incl
//!     type: Increment
//! connections:
//!   - from: gen.out
//!     to: incl.in
//! ```

mod cell;
mod connection;

pub use cell::CellDefinition;
pub use connection::ConnectionDefinition;

use crate::error::{PlasmError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A complete plasm definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlasmDefinition {
    /// Plasm name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Cells in insertion order.
    #[serde(default)]
    pub cells: Vec<CellDefinition>,

    /// Connections between cell ports.
    #[serde(default)]
    pub connections: Vec<ConnectionDefinition>,
}

fn default_name() -> String {
    "plasm".to_string()
}

impl PlasmDefinition {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            cells: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| PlasmError::Serialization(e.to_string()))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PlasmError::Serialization(e.to_string()))
    }

    /// Append a cell.
    pub fn with_cell(mut self, cell: CellDefinition) -> Self {
        self.cells.push(cell);
        self
    }

    /// Append a connection.
    pub fn with_connection(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.connections.push(ConnectionDefinition::new(from, to));
        self
    }

    /// Look up a cell definition by id.
    pub fn get_cell(&self, id: &str) -> Option<&CellDefinition> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Check ids and connection endpoints.
    ///
    /// Ids must be non-empty, unique and free of dots, since connection
    /// endpoints are written as `cell.port`.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for cell in &self.cells {
            if cell.id.trim().is_empty() {
                return Err(PlasmError::cell_config(&cell.cell_type, "cell id is empty"));
            }
            if cell.id.contains('.') {
                return Err(PlasmError::cell_config(&cell.id, "cell id must not contain '.'"));
            }
            if !seen.insert(cell.id.as_str()) {
                return Err(PlasmError::cell_config(&cell.id, "duplicate cell id"));
            }
        }

        for conn in &self.connections {
            for (cell, _) in [conn.parse_from(), conn.parse_to()] {
                if !seen.contains(cell) {
                    return Err(PlasmError::cell_config(
                        cell,
                        format!("connection '{} -> {}' references an undefined cell", conn.from, conn.to),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"
name: chain
cells:
  - id: gen
    type: Generate
    config:
      step: 1.0
  - id: printer
    type: Printer
connections:
  - from: gen
    to: printer
"#;

    #[test]
    fn parse_simple_definition() {
        let def = PlasmDefinition::from_yaml(SIMPLE).unwrap();
        assert_eq!(def.name, "chain");
        assert_eq!(def.cells.len(), 2);
        assert_eq!(def.cells[0].cell_type, "Generate");
        assert_eq!(def.connections[0].parse_from(), ("gen", "out"));
        assert!(def.validate().is_ok());
    }

    #[test]
    fn name_defaults() {
        let def = PlasmDefinition::from_yaml("cells: []").unwrap();
        assert_eq!(def.name, "plasm");
        assert!(def.connections.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let def = PlasmDefinition::new("dup")
            .with_cell(CellDefinition::new("a", "Generate"))
            .with_cell(CellDefinition::new("a", "Printer"));
        let err = def.validate().unwrap_err();
        assert!(matches!(err, PlasmError::CellConfig { ref cell, .. } if cell == "a"));
    }

    #[test]
    fn dotted_ids_are_rejected() {
        let def = PlasmDefinition::new("dotted")
            .with_cell(CellDefinition::new("stage.one", "Increment"))
            .with_cell(CellDefinition::new("printer", "Printer"))
            .with_connection("stage.one", "printer");
        let err = def.validate().unwrap_err();
        assert!(matches!(err, PlasmError::CellConfig { ref cell, .. } if cell == "stage.one"));
    }

    #[test]
    fn undefined_endpoints_are_rejected() {
        let def = PlasmDefinition::new("dangling")
            .with_cell(CellDefinition::new("gen", "Generate"))
            .with_connection("gen.out", "missing.in");
        assert!(def.validate().is_err());
    }

    #[test]
    fn yaml_round_trip_keeps_order() {
        let def = PlasmDefinition::from_yaml(SIMPLE).unwrap();
        let again = PlasmDefinition::from_yaml(&def.to_yaml().unwrap()).unwrap();
        let ids: Vec<_> = again.cells.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["gen", "printer"]);
    }

    #[test]
    fn malformed_yaml_is_a_serialization_error() {
        let err = PlasmDefinition::from_yaml("cells: [unclosed").unwrap_err();
        assert_eq!(err.code(), "E601");
    }
}
