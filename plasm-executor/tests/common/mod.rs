//! Common test utilities for integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use plasm_cells::{Add, Generate, Increment, PrintSink, Printer};
use plasm_core::error::{PlasmError, Result};
use plasm_core::tendrils::Tendrils;
use plasm_core::traits::{Cell, CellInfo, CellStatus, Port};
use plasm_core::types::CellId;
use plasm_core::value::ValueType;
use plasm_executor::scheduler::Plasm;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared call counter.
pub type Calls = Arc<AtomicUsize>;

/// Create a fresh counter.
pub fn calls() -> Calls {
    Arc::new(AtomicUsize::new(0))
}

/// Read a counter.
pub fn count(calls: &Calls) -> usize {
    calls.load(Ordering::SeqCst)
}

/// Passes `in + 1` to `out` and counts its invocations.
pub struct CountingCell {
    calls: Calls,
}

impl CountingCell {
    pub fn new(calls: Calls) -> Self {
        Self { calls }
    }
}

impl Cell for CountingCell {
    fn info(&self) -> CellInfo {
        CellInfo::new("Counting")
            .with_inputs(vec![Port::input("in", ValueType::Double).with_default(0.0)])
            .with_outputs(vec![Port::output("out", ValueType::Double)])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let x: f64 = inputs.get("in")?;
        outputs.set("out", x + 1.0)?;
        Ok(CellStatus::Continue)
    }
}

/// Fails on the given call (1-based) and counts its invocations.
pub struct FailingCell {
    fail_on: usize,
    calls: Calls,
}

impl FailingCell {
    pub fn new(fail_on: usize, calls: Calls) -> Self {
        Self { fail_on, calls }
    }
}

impl Cell for FailingCell {
    fn info(&self) -> CellInfo {
        CellInfo::new("Failing")
            .with_inputs(vec![Port::input("in", ValueType::Double).with_default(0.0)])
            .with_outputs(vec![Port::output("out", ValueType::Double)])
    }

    fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(PlasmError::invalid_input("in", "refusing this tick"));
        }
        outputs.set("out", inputs.get::<f64>("in")?)?;
        Ok(CellStatus::Continue)
    }
}

/// Emits one word per tick, repeating the last one when the list runs out.
pub struct Words {
    words: Vec<String>,
    next: usize,
}

impl Words {
    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            next: 0,
        }
    }
}

impl Cell for Words {
    fn info(&self) -> CellInfo {
        CellInfo::new("Words").with_outputs(vec![Port::output("out", ValueType::String)])
    }

    fn process(&mut self, _inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
        let index = self.next.min(self.words.len().saturating_sub(1));
        let word = self.words.get(index).cloned().unwrap_or_default();
        self.next += 1;
        outputs.set("out", word)?;
        Ok(CellStatus::Continue)
    }
}

/// Records the name of the thread it runs on.
pub struct ThreadRecorder {
    names: Arc<Mutex<Vec<String>>>,
    barrier: Option<Arc<std::sync::Barrier>>,
}

impl ThreadRecorder {
    pub fn new(names: Arc<Mutex<Vec<String>>>, barrier: Option<Arc<std::sync::Barrier>>) -> Self {
        Self { names, barrier }
    }
}

impl Cell for ThreadRecorder {
    fn info(&self) -> CellInfo {
        CellInfo::new("ThreadRecorder")
    }

    fn process(&mut self, _inputs: &Tendrils, _outputs: &mut Tendrils) -> Result<CellStatus> {
        if let Some(barrier) = &self.barrier {
            barrier.wait();
        }
        let name = std::thread::current()
            .name()
            .unwrap_or("<unnamed>")
            .to_string();
        self.names.lock().push(name);
        Ok(CellStatus::Continue)
    }
}

/// Cells of the generator / incrementer / adder / printer plasm.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub gen_: CellId,
    pub incl: CellId,
    pub incr: CellId,
    pub add: CellId,
    pub printer: CellId,
}

/// Build `gen -> incl, gen -> incr, incl -> add.left, incr -> add.right,
/// add -> printer`, with the printer writing into the returned buffer.
pub fn build_scenario() -> (Plasm, Scenario, Arc<Mutex<Vec<String>>>) {
    let (sink, lines) = PrintSink::buffer();
    let mut plasm = Plasm::new();

    let gen_ = plasm.insert_named("gen", Generate::new(1.0, 0.0)).unwrap();
    let incl = plasm.insert_named("incl", Increment::new(0.0)).unwrap();
    let incr = plasm.insert_named("incr", Increment::new(0.0)).unwrap();
    let add = plasm.insert_named("add", Add).unwrap();
    let printer = plasm.insert_named("printer", Printer::with_sink(sink)).unwrap();

    plasm.connect(gen_, "out", incl, "in").unwrap();
    plasm.connect(gen_, "out", incr, "in").unwrap();
    plasm.connect(incl, "out", add, "left").unwrap();
    plasm.connect(incr, "out", add, "right").unwrap();
    plasm.connect(add, "out", printer, "in").unwrap();

    (
        plasm,
        Scenario {
            gen_,
            incl,
            incr,
            add,
            printer,
        },
        lines,
    )
}

/// Value `add.out` holds after `ticks` ticks of the scenario plasm.
///
/// Tick k feeds `k - 1` into each incrementer, so each holds the sum of
/// `0..ticks` and the adder doubles it.
pub fn expected_sum(ticks: u64) -> f64 {
    (ticks * ticks.saturating_sub(1)) as f64
}

/// `width` independent chains of `depth` incrementers fed by one generator,
/// each chain ending in its own printer. Returns the plasm and the shared
/// printer buffer.
pub fn build_chains(width: usize, depth: usize) -> (Plasm, Arc<Mutex<Vec<String>>>) {
    let (sink, lines) = PrintSink::buffer();
    let mut plasm = Plasm::new();
    let source = plasm.insert_named("gen", Generate::new(1.0, 1.0)).unwrap();

    for chain in 0..width {
        let mut upstream = source;
        for stage in 0..depth {
            let cell = plasm
                .insert_named(format!("inc_{}_{}", chain, stage), Increment::new(chain as f64))
                .unwrap();
            plasm.connect(upstream, "out", cell, "in").unwrap();
            upstream = cell;
        }
        let printer = plasm
            .insert_named(
                format!("print_{}", chain),
                Printer::with_sink(sink.clone()).with_prefix(format!("{}:", chain)),
            )
            .unwrap();
        plasm.connect(upstream, "out", printer, "in").unwrap();
    }

    (plasm, lines)
}

/// Sorted copy of the buffer; printers in one wave may interleave.
pub fn sorted_lines(lines: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    let mut copy = lines.lock().clone();
    copy.sort();
    copy
}
