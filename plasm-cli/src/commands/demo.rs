//! Demo command - the generator / incrementer / adder / printer plasm.
//!
//! A generator feeds two incrementer chains whose tails meet in an adder,
//! and a printer writes the sum every tick:
//!
//! ```text
//! gen -> incl[0] -> .. -> incl[d] -> add.left
//!     -> incr[0] -> .. -> incr[d] -> add.right
//! add -> printer
//! ```

use super::run::{execute_repeated, print_stats};
use super::viz::write_dot;
use anyhow::Result;
use plasm_cells::{Add, Generate, Increment, PrintSink, Printer};
use plasm_core::error::Result as PlasmResult;
use plasm_core::types::CellId;
use plasm_executor::scheduler::{Plasm, Scheduler};
use std::path::PathBuf;

/// Options of the demo command.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Extra incrementer stages per chain.
    pub depth: usize,
    /// Worker threads.
    pub threads: usize,
    /// Ticks per run.
    pub ticks: u64,
    /// Number of consecutive runs.
    pub repeat: u32,
    /// Where to write the DOT topology, if anywhere.
    pub dot: Option<PathBuf>,
}

/// The demo plasm and the cells worth inspecting.
pub struct DemoPlasm {
    pub plasm: Plasm,
    /// Left incrementer chain, head first.
    pub left: Vec<CellId>,
    /// Right incrementer chain, head first.
    pub right: Vec<CellId>,
    pub add: CellId,
}

/// Build the demo plasm with `depth` extra incrementers per chain.
pub fn build(depth: usize, sink: PrintSink) -> PlasmResult<DemoPlasm> {
    let mut plasm = Plasm::new();
    let gen_ = plasm.insert_named("gen", Generate::new(1.0, 0.0))?;

    let mut left = Vec::with_capacity(depth + 1);
    let mut right = Vec::with_capacity(depth + 1);
    for stage in 0..=depth {
        let l = plasm.insert_named(format!("incl_{}", stage), Increment::new(0.0))?;
        let r = plasm.insert_named(format!("incr_{}", stage), Increment::new(0.0))?;
        let (from_l, from_r) = match (left.last(), right.last()) {
            (Some(&pl), Some(&pr)) => (pl, pr),
            _ => (gen_, gen_),
        };
        plasm.connect(from_l, "out", l, "in")?;
        plasm.connect(from_r, "out", r, "in")?;
        left.push(l);
        right.push(r);
    }

    let add = plasm.insert_named("add", Add)?;
    let printer = plasm.insert_named("printer", Printer::with_sink(sink).with_prefix("add: "))?;
    if let (Some(&l), Some(&r)) = (left.last(), right.last()) {
        plasm.connect(l, "out", add, "left")?;
        plasm.connect(r, "out", add, "right")?;
    }
    plasm.connect(add, "out", printer, "in")?;

    Ok(DemoPlasm {
        plasm,
        left,
        right,
        add,
    })
}

/// Run the demo command.
pub fn run(options: &DemoOptions) -> Result<()> {
    let demo = build(options.depth, PrintSink::Stdout)?;

    if let Some(path) = &options.dot {
        write_dot(&demo.plasm, path)?;
    }
    println!("{}", demo.plasm.viz());

    let add = demo.add;
    let mut scheduler = Scheduler::new(demo.plasm);
    let runs = execute_repeated(&mut scheduler, Some(options.threads), options.ticks, options.repeat)?;
    for (index, stats) in runs.iter().enumerate() {
        print_stats("demo", index + 1, stats);
    }

    let result: f64 = scheduler.plasm().output(add, "out")?;
    println!("result = {}", result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_adds_the_chain_outputs() {
        let (sink, lines) = PrintSink::buffer();
        let demo = build(0, sink).unwrap();
        let (l, r, add) = (demo.left[0], demo.right[0], demo.add);
        let mut scheduler = Scheduler::new(demo.plasm);

        scheduler.execute(1, 1).unwrap();
        let plasm = scheduler.plasm();
        let left: f64 = plasm.output(l, "out").unwrap();
        let right: f64 = plasm.output(r, "out").unwrap();
        assert_eq!(plasm.output::<f64>(add, "out").unwrap(), left + right);
        assert_eq!(lines.lock().as_slice(), ["add: 0"]);
    }

    #[test]
    fn two_runs_of_five_advance_each_chain_ten_times() {
        let (sink, lines) = PrintSink::buffer();
        let demo = build(0, sink).unwrap();
        let (l, r, add) = (demo.left[0], demo.right[0], demo.add);
        let mut scheduler = Scheduler::new(demo.plasm);

        let runs = execute_repeated(&mut scheduler, Some(1), 5, 2).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].total_ticks, 10);

        // gen emits 0..=9, so each chain holds their sum
        let plasm = scheduler.plasm();
        assert_eq!(plasm.output::<f64>(l, "out").unwrap(), 45.0);
        assert_eq!(plasm.output::<f64>(r, "out").unwrap(), 45.0);
        assert_eq!(plasm.output::<f64>(add, "out").unwrap(), 90.0);
        assert_eq!(lines.lock().len(), 10);
    }

    #[test]
    fn depth_adds_stages_and_waves() {
        let demo = build(2, PrintSink::buffer().0).unwrap();
        assert_eq!(demo.left.len(), 3);
        assert_eq!(demo.plasm.cell_count(), 1 + 2 * 3 + 2);
        assert_eq!(demo.plasm.waves().unwrap().len(), 6);

        let threaded = {
            let (sink, _lines) = PrintSink::buffer();
            let demo = build(2, sink).unwrap();
            let add = demo.add;
            let mut scheduler = Scheduler::new(demo.plasm);
            scheduler.execute(4, 6).unwrap();
            scheduler.plasm().output::<f64>(add, "out").unwrap()
        };
        let single = {
            let (sink, _lines) = PrintSink::buffer();
            let demo = build(2, sink).unwrap();
            let add = demo.add;
            let mut scheduler = Scheduler::new(demo.plasm);
            scheduler.execute(1, 6).unwrap();
            scheduler.plasm().output::<f64>(add, "out").unwrap()
        };
        assert_eq!(threaded, single);
    }

    #[test]
    fn writes_dot_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let dot = dir.path().join("graph.dot");
        let options = DemoOptions {
            depth: 1,
            threads: 2,
            ticks: 2,
            repeat: 1,
            dot: Some(dot.clone()),
        };

        run(&options).unwrap();
        let text = std::fs::read_to_string(dot).unwrap();
        assert_eq!(text.lines().filter(|l| l.contains(" -> c")).count(), 7);
    }
}
