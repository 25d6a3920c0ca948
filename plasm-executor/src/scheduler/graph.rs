//! Plasm graph representation and analysis.

use parking_lot::{Mutex, RwLock};
use plasm_core::error::{PlasmError, Result};
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, PortDirection};
use plasm_core::types::CellId;
use plasm_core::value::{PortValue, Value};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// A directed connection from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Source cell.
    pub from_cell: CellId,
    /// Source output port.
    pub from_port: String,
    /// Destination cell.
    pub to_cell: CellId,
    /// Destination input port.
    pub to_port: String,
}

impl Connection {
    /// Create a new connection.
    pub fn new(
        from_cell: CellId,
        from_port: impl Into<String>,
        to_cell: CellId,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            from_cell,
            from_port: from_port.into(),
            to_cell,
            to_port: to_port.into(),
        }
    }
}

/// A registered cell together with its port storage.
pub(crate) struct CellSlot {
    pub(crate) id: CellId,
    pub(crate) name: String,
    pub(crate) info: CellInfo,
    pub(crate) cell: Mutex<Box<dyn Cell>>,
    pub(crate) inputs: Mutex<Tendrils>,
    pub(crate) outputs: RwLock<Tendrils>,
}

/// Execution order and wave partition of a plasm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Topological order; ties are broken by registration order.
    pub order: Vec<CellId>,
    /// Cells grouped by dependency depth. No cell depends on another cell
    /// of its own wave.
    pub waves: Vec<Vec<CellId>>,
}

impl Schedule {
    /// Number of cells covered by the schedule.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the schedule covers no cells.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Size of the widest wave.
    pub fn max_width(&self) -> usize {
        self.waves.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A graph of cells connected output-to-input.
///
/// Cells are owned by the plasm and addressed by the [`CellId`] returned
/// from [`Plasm::insert`]. Every structural change bumps [`Plasm::version`].
/// Together with the process-unique [`Plasm::instance`], that tells a
/// scheduler whether its cached order still describes this plasm.
pub struct Plasm {
    instance: u64,
    cells: Vec<CellSlot>,
    connections: Vec<Connection>,
    /// Connection indices keyed by source cell index.
    outgoing: Vec<Vec<usize>>,
    /// Connection indices keyed by destination cell index.
    incoming: Vec<Vec<usize>>,
    /// Which connection feeds each bound input.
    bound: HashMap<(CellId, String), usize>,
    version: u64,
}

impl Plasm {
    /// Create an empty plasm.
    pub fn new() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            cells: Vec::new(),
            connections: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            bound: HashMap::new(),
            version: 0,
        }
    }

    /// Register a cell, naming it after its type.
    pub fn insert<C: Cell + 'static>(&mut self, cell: C) -> Result<CellId> {
        self.insert_boxed(None, Box::new(cell))
    }

    /// Register a cell under an explicit display name.
    pub fn insert_named<C: Cell + 'static>(
        &mut self,
        name: impl Into<String>,
        cell: C,
    ) -> Result<CellId> {
        self.insert_boxed(Some(name.into()), Box::new(cell))
    }

    /// Register an already boxed cell.
    ///
    /// Fails if the cell declares a port twice or a default that does not
    /// fit its port type; nothing is registered in that case.
    pub fn insert_boxed(&mut self, name: Option<String>, cell: Box<dyn Cell>) -> Result<CellId> {
        let info = cell.info();
        let inputs = Tendrils::from_ports(&info.inputs)?;
        let outputs = Tendrils::from_ports(&info.outputs)?;

        let index = u32::try_from(self.cells.len()).map_err(|_| {
            PlasmError::InvalidConfiguration {
                field: "cells".to_string(),
                cause: "too many cells".to_string(),
            }
        })?;
        let id = CellId::new(index);
        let name = name.unwrap_or_else(|| info.type_name.clone());

        tracing::debug!(cell = %id, name = %name, cell_type = %info.type_name, "Registered cell");

        self.cells.push(CellSlot {
            id,
            name,
            info,
            cell: Mutex::new(cell),
            inputs: Mutex::new(inputs),
            outputs: RwLock::new(outputs),
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.version += 1;
        Ok(id)
    }

    /// Connect `from_cell.from_port` to `to_cell.to_port`.
    ///
    /// All checks run before anything is recorded, so a rejected connection
    /// leaves the plasm untouched.
    pub fn connect(
        &mut self,
        from_cell: CellId,
        from_port: &str,
        to_cell: CellId,
        to_port: &str,
    ) -> Result<()> {
        let source = self.slot(from_cell)?;
        let target = self.slot(to_cell)?;

        let output = source
            .info
            .get_output(from_port)
            .ok_or_else(|| unknown_port(source, from_port, PortDirection::Output))?;
        let input = target
            .info
            .get_input(to_port)
            .ok_or_else(|| unknown_port(target, to_port, PortDirection::Input))?;

        if !input.value_type.is_compatible(output.value_type) {
            return Err(PlasmError::TypeMismatch {
                port: format!("{}.{}", to_cell, to_port),
                expected: input.value_type,
                actual: output.value_type,
            });
        }

        let key = (to_cell, to_port.to_string());
        if let Some(&existing) = self.bound.get(&key) {
            let feeder = &self.connections[existing];
            return Err(PlasmError::PortAlreadyBound {
                cell: to_cell,
                port: to_port.to_string(),
                bound_from: format!("{}.{}", feeder.from_cell, feeder.from_port),
            });
        }

        let idx = self.connections.len();
        self.connections
            .push(Connection::new(from_cell, from_port, to_cell, to_port));
        self.outgoing[from_cell.index()].push(idx);
        self.incoming[to_cell.index()].push(idx);
        self.bound.insert(key, idx);
        self.version += 1;

        tracing::debug!(
            from = %format_args!("{}.{}", from_cell, from_port),
            to = %format_args!("{}.{}", to_cell, to_port),
            "Connected cells"
        );
        Ok(())
    }

    /// Structural version, bumped on every insert and connect.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identifier unique to this plasm within the process.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Number of registered cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are registered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cell ids in registration order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().map(|slot| slot.id)
    }

    /// All connections in the order they were made.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Display name of a cell.
    pub fn name(&self, cell: CellId) -> Result<&str> {
        Ok(&self.slot(cell)?.name)
    }

    /// Port declarations of a cell.
    pub fn info(&self, cell: CellId) -> Result<&CellInfo> {
        Ok(&self.slot(cell)?.info)
    }

    /// Connections leaving a cell.
    pub fn outgoing(&self, cell: CellId) -> impl Iterator<Item = &Connection> {
        self.outgoing
            .get(cell.index())
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&i| &self.connections[i]))
    }

    /// Connections entering a cell.
    pub fn incoming(&self, cell: CellId) -> impl Iterator<Item = &Connection> {
        self.incoming
            .get(cell.index())
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&i| &self.connections[i]))
    }

    /// Distinct cells feeding `cell`, in ascending id order.
    pub fn predecessors(&self, cell: CellId) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self.incoming(cell).map(|c| c.from_cell).collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// Distinct cells fed by `cell`, in ascending id order.
    pub fn successors(&self, cell: CellId) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self.outgoing(cell).map(|c| c.to_cell).collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// Current value of an output port.
    pub fn output_value(&self, cell: CellId, port: &str) -> Result<Option<Value>> {
        let slot = self.slot(cell)?;
        if slot.info.get_output(port).is_none() {
            return Err(unknown_port(slot, port, PortDirection::Output));
        }
        Ok(slot.outputs.read().get_value(port).cloned())
    }

    /// Typed read of an output port.
    pub fn output<T: PortValue>(&self, cell: CellId, port: &str) -> Result<T> {
        let slot = self.slot(cell)?;
        if slot.info.get_output(port).is_none() {
            return Err(unknown_port(slot, port, PortDirection::Output));
        }
        slot.outputs.read().get(port)
    }

    /// Typed read of an input port as the cell last saw it.
    pub fn input<T: PortValue>(&self, cell: CellId, port: &str) -> Result<T> {
        let slot = self.slot(cell)?;
        if slot.info.get_input(port).is_none() {
            return Err(unknown_port(slot, port, PortDirection::Input));
        }
        slot.inputs.lock().get(port)
    }

    /// Set an input port directly, for inputs with no incoming connection.
    pub fn set_input(&mut self, cell: CellId, port: &str, value: impl Into<Value>) -> Result<()> {
        let slot = self.slot(cell)?;
        if slot.info.get_input(port).is_none() {
            return Err(unknown_port(slot, port, PortDirection::Input));
        }
        slot.inputs.lock().set_value(port, value.into())
    }

    /// Compute the execution order and wave partition.
    ///
    /// Uses Kahn's algorithm with a min-heap on cell ids, so independent
    /// cells always come out in registration order. Fails with
    /// `CyclicGraph` when any cell sits on a same-tick cycle.
    pub fn schedule(&self) -> Result<Schedule> {
        let count = self.cells.len();
        let mut in_degree = vec![0usize; count];
        for conn in &self.connections {
            in_degree[conn.to_cell.index()] += 1;
        }

        let mut ready: BinaryHeap<Reverse<CellId>> = self
            .cells
            .iter()
            .filter(|slot| in_degree[slot.id.index()] == 0)
            .map(|slot| Reverse(slot.id))
            .collect();

        let mut order = Vec::with_capacity(count);
        let mut level = vec![0usize; count];

        while let Some(Reverse(cell)) = ready.pop() {
            order.push(cell);
            for conn in self.outgoing(cell) {
                let next = conn.to_cell.index();
                level[next] = level[next].max(level[cell.index()] + 1);
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(conn.to_cell));
                }
            }
        }

        if order.len() != count {
            let cells: Vec<CellId> = self
                .cells
                .iter()
                .filter(|slot| in_degree[slot.id.index()] > 0)
                .map(|slot| slot.id)
                .collect();
            return Err(PlasmError::CyclicGraph { cells });
        }

        let depth = order.iter().map(|c| level[c.index()] + 1).max().unwrap_or(0);
        let mut waves = vec![Vec::new(); depth];
        // Ids are visited ascending so each wave stays in registration order.
        for slot in &self.cells {
            waves[level[slot.id.index()]].push(slot.id);
        }

        Ok(Schedule { order, waves })
    }

    /// Topological execution order.
    pub fn execution_order(&self) -> Result<Vec<CellId>> {
        Ok(self.schedule()?.order)
    }

    /// Cells grouped into waves of mutually independent cells.
    pub fn waves(&self) -> Result<Vec<Vec<CellId>>> {
        Ok(self.schedule()?.waves)
    }

    /// Check that the plasm can run: no cycles and every required input
    /// either connected or defaulted.
    pub fn validate(&self) -> Result<Schedule> {
        let schedule = self.schedule()?;
        for slot in &self.cells {
            for port in slot.info.inputs.iter().filter(|p| p.needs_binding()) {
                let fed = self.bound.contains_key(&(slot.id, port.name.clone()));
                let preset = slot.inputs.lock().get_value(&port.name).is_some();
                if !fed && !preset {
                    return Err(PlasmError::UnboundInput {
                        cell: slot.id,
                        port: port.name.clone(),
                    });
                }
            }
        }
        Ok(schedule)
    }

    pub(crate) fn slot(&self, cell: CellId) -> Result<&CellSlot> {
        self.cells
            .get(cell.index())
            .ok_or(PlasmError::UnknownCell { cell })
    }

    pub(crate) fn slots(&self) -> &[CellSlot] {
        &self.cells
    }
}

impl Default for Plasm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Plasm {
    fn drop(&mut self) {
        for slot in &mut self.cells {
            slot.cell.get_mut().shutdown();
        }
    }
}

impl std::fmt::Debug for Plasm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plasm")
            .field("instance", &self.instance)
            .field("cells", &self.cells.len())
            .field("connections", &self.connections.len())
            .field("version", &self.version)
            .finish()
    }
}

fn unknown_port(slot: &CellSlot, port: &str, direction: PortDirection) -> PlasmError {
    PlasmError::UnknownPort {
        cell: slot.id,
        cell_type: slot.info.type_name.clone(),
        port: port.to_string(),
        direction: direction.as_str(),
    }
}
