//! PlasmLoader - loads YAML plasm definitions.

use super::builder::PlasmBuilder;
use crate::scheduler::Plasm;
use plasm_core::definition::PlasmDefinition;
use plasm_core::error::PlasmError;
use plasm_core::traits::CellRegistry;
use plasm_core::types::CellId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A plasm built from a definition.
#[derive(Debug)]
pub struct LoadedPlasm {
    /// The plasm, ready to hand to a scheduler.
    pub plasm: Plasm,
    /// Definition ids mapped to the cells they created.
    pub cell_ids: HashMap<String, CellId>,
    /// The definition the plasm was built from.
    pub definition: PlasmDefinition,
}

impl LoadedPlasm {
    /// Plasm name from the definition.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Look up the cell created for a definition id.
    pub fn cell_id(&self, id: &str) -> Option<CellId> {
        self.cell_ids.get(id).copied()
    }
}

/// Error during plasm loading.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// I/O error reading file.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The file path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// YAML parse error.
    #[error("failed to parse {}: {source}", describe(path))]
    Parse {
        /// The file path being parsed, if available.
        path: Option<PathBuf>,
        /// The underlying YAML parse error.
        source: serde_yaml::Error,
    },

    /// The definition could not be turned into a plasm.
    #[error("failed to build plasm: {source}")]
    Build {
        /// The underlying error.
        source: PlasmError,
    },
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("'{}'", path.display()),
        None => "YAML".to_string(),
    }
}

/// Loads plasm definitions, creating cells through a registry.
pub struct PlasmLoader {
    registry: CellRegistry,
}

impl PlasmLoader {
    /// Create a loader over a cell registry.
    pub fn new(registry: CellRegistry) -> Self {
        Self { registry }
    }

    /// The registry used to create cells.
    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    /// Load a plasm from a YAML file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedPlasm, LoaderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let definition: PlasmDefinition =
            serde_yaml::from_str(&content).map_err(|e| LoaderError::Parse {
                path: Some(path.to_path_buf()),
                source: e,
            })?;

        self.load_definition(definition)
    }

    /// Load a plasm from a YAML string.
    pub fn load_yaml(&self, yaml: &str) -> Result<LoadedPlasm, LoaderError> {
        let definition: PlasmDefinition =
            serde_yaml::from_str(yaml).map_err(|e| LoaderError::Parse {
                path: None,
                source: e,
            })?;

        self.load_definition(definition)
    }

    /// Build a plasm from a pre-parsed definition.
    #[tracing::instrument(skip(self, definition), fields(plasm = %definition.name))]
    pub fn load_definition(&self, definition: PlasmDefinition) -> Result<LoadedPlasm, LoaderError> {
        let (plasm, cell_ids) = PlasmBuilder::new(&self.registry)
            .build(&definition)
            .map_err(|e| LoaderError::Build { source: e })?;

        tracing::debug!(
            cells = plasm.cell_count(),
            connections = plasm.connections().len(),
            "Loaded plasm"
        );

        Ok(LoadedPlasm {
            plasm,
            cell_ids,
            definition,
        })
    }
}

impl std::fmt::Debug for PlasmLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlasmLoader")
            .field("registry", &self.registry)
            .finish()
    }
}
