//! PlasmBuilder - converts a PlasmDefinition into a Plasm.

use crate::scheduler::Plasm;
use plasm_core::definition::PlasmDefinition;
use plasm_core::error::{PlasmError, Result};
use plasm_core::traits::{CellParams, CellRegistry};
use plasm_core::types::CellId;
use std::collections::HashMap;

/// Builder that instantiates the cells of a definition and wires them up.
pub struct PlasmBuilder<'r> {
    registry: &'r CellRegistry,
    cell_ids: HashMap<String, CellId>,
    plasm: Plasm,
}

impl<'r> PlasmBuilder<'r> {
    /// Create a builder that resolves cell types through `registry`.
    pub fn new(registry: &'r CellRegistry) -> Self {
        Self {
            registry,
            cell_ids: HashMap::new(),
            plasm: Plasm::new(),
        }
    }

    /// Build the plasm, returning it with the id → `CellId` mapping.
    pub fn build(mut self, definition: &PlasmDefinition) -> Result<(Plasm, HashMap<String, CellId>)> {
        definition.validate()?;
        self.add_cells(definition)?;
        self.add_connections(definition)?;
        Ok((self.plasm, self.cell_ids))
    }

    fn add_cells(&mut self, definition: &PlasmDefinition) -> Result<()> {
        for def in &definition.cells {
            let params = CellParams::new(def.config.clone());
            let cell = self.registry.create(&def.cell_type, &params)?;
            let id = self.plasm.insert_boxed(Some(def.id.clone()), cell)?;
            self.cell_ids.insert(def.id.clone(), id);
        }
        Ok(())
    }

    fn add_connections(&mut self, definition: &PlasmDefinition) -> Result<()> {
        for conn in &definition.connections {
            let (from, from_port) = conn.parse_from();
            let (to, to_port) = conn.parse_to();
            let from_id = self.get_id(from)?;
            let to_id = self.get_id(to)?;
            self.plasm.connect(from_id, from_port, to_id, to_port)?;
        }
        Ok(())
    }

    fn get_id(&self, name: &str) -> Result<CellId> {
        self.cell_ids
            .get(name)
            .copied()
            .ok_or_else(|| PlasmError::cell_config(name, "cell is not defined"))
    }
}
