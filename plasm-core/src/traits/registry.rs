//! Cell factories and the registry that maps type names to them.

use super::cell::Cell;
use crate::error::{PlasmError, Result};
use std::collections::BTreeMap;

/// Construction parameters for a cell (from YAML).
#[derive(Debug, Clone, Default)]
pub struct CellParams {
    /// Type-specific parameters.
    pub params: serde_yaml::Value,
}

impl CellParams {
    /// Wrap a YAML value.
    pub fn new(params: serde_yaml::Value) -> Self {
        Self { params }
    }

    /// Empty parameters; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get a string parameter.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer parameter.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.params.get(key).and_then(|v| v.as_i64())
    }

    /// Get a float parameter (integers are accepted).
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(|v| v.as_f64())
    }

    /// Get a boolean parameter.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.params.get(key).and_then(|v| v.as_bool())
    }

    /// Float parameter with a default; present but non-numeric values are an error.
    pub fn f64_or(&self, cell: &str, key: &str, default: f64) -> Result<f64> {
        match self.params.get(key) {
            None => Ok(default),
            Some(_) => self
                .get_f64(key)
                .ok_or_else(|| PlasmError::cell_config(cell, format!("'{}' must be a number", key))),
        }
    }

    /// Integer parameter with a default; present but non-integer values are an error.
    pub fn i64_or(&self, cell: &str, key: &str, default: i64) -> Result<i64> {
        match self.params.get(key) {
            None => Ok(default),
            Some(_) => self.get_i64(key).ok_or_else(|| {
                PlasmError::cell_config(cell, format!("'{}' must be an integer", key))
            }),
        }
    }

    /// String parameter with a default; present but non-string values are an error.
    pub fn string_or(&self, cell: &str, key: &str, default: &str) -> Result<String> {
        match self.params.get(key) {
            None => Ok(default.to_string()),
            Some(_) => self
                .get_string(key)
                .map(str::to_string)
                .ok_or_else(|| PlasmError::cell_config(cell, format!("'{}' must be a string", key))),
        }
    }
}

/// A factory that creates cell instances from parameters.
pub trait CellFactory: Send + Sync {
    /// Get the cell type name this factory creates.
    fn cell_type(&self) -> &str;

    /// Create a new cell instance.
    fn create(&self, params: &CellParams) -> Result<Box<dyn Cell>>;
}

struct FnFactory<F> {
    cell_type: String,
    build: F,
}

impl<F> CellFactory for FnFactory<F>
where
    F: Fn(&CellParams) -> Result<Box<dyn Cell>> + Send + Sync,
{
    fn cell_type(&self) -> &str {
        &self.cell_type
    }

    fn create(&self, params: &CellParams) -> Result<Box<dyn Cell>> {
        (self.build)(params)
    }
}

/// Registry of cell factories keyed by type name.
#[derive(Default)]
pub struct CellRegistry {
    factories: BTreeMap<String, Box<dyn CellFactory>>,
}

impl CellRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous factory for the same type.
    pub fn register(&mut self, factory: Box<dyn CellFactory>) {
        let cell_type = factory.cell_type().to_string();
        if self.factories.insert(cell_type.clone(), factory).is_some() {
            tracing::debug!(cell_type = %cell_type, "Replaced cell factory");
        }
    }

    /// Register a closure as the factory for `cell_type`.
    pub fn register_fn<F>(&mut self, cell_type: impl Into<String>, build: F)
    where
        F: Fn(&CellParams) -> Result<Box<dyn Cell>> + Send + Sync + 'static,
    {
        self.register(Box::new(FnFactory {
            cell_type: cell_type.into(),
            build,
        }));
    }

    /// Create a cell of the given type.
    pub fn create(&self, cell_type: &str, params: &CellParams) -> Result<Box<dyn Cell>> {
        let factory = self
            .factories
            .get(cell_type)
            .ok_or_else(|| PlasmError::UnknownCellType {
                cell_type: cell_type.to_string(),
            })?;
        factory.create(params)
    }

    /// Whether a factory is registered for the type.
    pub fn contains(&self, cell_type: &str) -> bool {
        self.factories.contains_key(cell_type)
    }

    /// Registered type names, sorted.
    pub fn cell_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for CellRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellRegistry")
            .field("cell_types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
