//! Cell definition from YAML.

use serde::{Deserialize, Serialize};

/// A cell definition from YAML.
///
/// # Example
///
/// ```yaml
/// cells:
///   - id: gen
///     type: Generate
///     config:
///       step: 1.0
///       start: 0.0
///
///   - id: printer
///     type: Printer
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDefinition {
    /// Unique cell id within the plasm; also used as the display name.
    pub id: String,

    /// Registered cell type (e.g., "Generate", "Add").
    #[serde(rename = "type")]
    pub cell_type: String,

    /// Type-specific configuration.
    #[serde(default)]
    pub config: serde_yaml::Value,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CellDefinition {
    /// Create a new cell definition with empty configuration.
    pub fn new(id: impl Into<String>, cell_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cell_type: cell_type.into(),
            config: serde_yaml::Value::Null,
            description: None,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: serde_yaml::Value) -> Self {
        self.config = config;
        self
    }

    /// Set description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}
