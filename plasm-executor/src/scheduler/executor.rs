//! Tick execution engine.
//!
//! The scheduler owns a [`Plasm`] and drives it tick by tick. Within a tick
//! the cells run wave by wave: every cell of a wave may run concurrently on
//! the worker pool, and the next wave only starts once the whole wave has
//! finished. Before a cell runs, the current values of its upstream outputs
//! are copied into its inputs.
//!
//! Cell state persists between `execute` calls, so running 5 ticks, then 5,
//! then 1 leaves the cells exactly where 11 ticks in a single call would.

use super::config::SchedulerConfig;
use super::graph::{Plasm, Schedule};
use super::pool::WorkerPool;
use plasm_core::error::{PlasmError, Result};
use plasm_core::traits::CellStatus;
use plasm_core::types::{CellId, RunId};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Where the scheduler is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Not running.
    #[default]
    Idle,
    /// Computing the execution order.
    Ordering,
    /// Running a wave of a tick.
    Executing {
        /// Tick of the current run (1-based).
        tick: u64,
        /// Wave index within the tick.
        wave: usize,
    },
    /// The last run stopped on an error.
    Failed,
}

/// Summary of a completed `execute` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Identifier of the run.
    pub run_id: RunId,
    /// Ticks completed by this run.
    pub ticks: u64,
    /// Ticks completed by this scheduler across all runs.
    pub total_ticks: u64,
    /// Waves per tick.
    pub waves: usize,
    /// Worker threads used: `thread_count` capped at the widest wave.
    pub threads: usize,
    /// Whether a cell asked the run to end early.
    pub quit_requested: bool,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

struct CachedSchedule {
    instance: u64,
    version: u64,
    schedule: Arc<Schedule>,
}

/// Runs a plasm for a number of ticks on a pool of worker threads.
pub struct Scheduler {
    plasm: Plasm,
    config: SchedulerConfig,
    cached: Option<CachedSchedule>,
    pool: Option<Arc<WorkerPool>>,
    state: SchedulerState,
    total_ticks: u64,
}

impl Scheduler {
    /// Create a scheduler with the default configuration.
    pub fn new(plasm: Plasm) -> Self {
        Self::with_config(plasm, SchedulerConfig::default())
    }

    /// Create a scheduler with a specific configuration.
    pub fn with_config(plasm: Plasm, config: SchedulerConfig) -> Self {
        Self {
            plasm,
            config,
            cached: None,
            pool: None,
            state: SchedulerState::Idle,
            total_ticks: 0,
        }
    }

    /// The owned plasm.
    pub fn plasm(&self) -> &Plasm {
        &self.plasm
    }

    /// Mutable access to the owned plasm, e.g. to add cells between runs.
    ///
    /// Any structural change, or replacing the plasm outright, invalidates
    /// the cached execution order.
    pub fn plasm_mut(&mut self) -> &mut Plasm {
        &mut self.plasm
    }

    /// Give back the plasm.
    pub fn into_plasm(self) -> Plasm {
        self.plasm
    }

    /// Scheduler configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Ticks completed across every run of this scheduler.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Execution order, computed or taken from the cache.
    pub fn execution_order(&mut self) -> Result<Vec<CellId>> {
        Ok(self.schedule()?.order.clone())
    }

    /// Run `tick_count` ticks with the configured default thread count.
    pub fn execute_default(&mut self, tick_count: u64) -> Result<RunStats> {
        self.execute(self.config.default_threads, tick_count)
    }

    /// Run `tick_count` ticks on at most `thread_count` worker threads.
    ///
    /// The pool never grows past the widest wave, so [`RunStats::threads`]
    /// may be lower than `thread_count`.
    ///
    /// Stops at the first cell failure with `ProcessError`; ticks completed
    /// before it are kept. A cell returning [`CellStatus::Quit`] ends the run
    /// after the current tick.
    #[tracing::instrument(
        name = "execute",
        skip(self),
        fields(run_id = tracing::field::Empty, waves = tracing::field::Empty)
    )]
    pub fn execute(&mut self, thread_count: usize, tick_count: u64) -> Result<RunStats> {
        if thread_count < 1 {
            return Err(PlasmError::InvalidConfiguration {
                field: "thread_count".to_string(),
                cause: "must be at least 1".to_string(),
            });
        }

        let run_id = RunId::new();
        let span = tracing::Span::current();
        span.record("run_id", tracing::field::display(run_id));
        let started = Instant::now();

        self.state = SchedulerState::Ordering;
        let schedule = match self.schedule() {
            Ok(schedule) => schedule,
            Err(e) => {
                self.state = SchedulerState::Failed;
                tracing::error!(error = %e, "Plasm cannot be scheduled");
                return Err(e);
            }
        };
        span.record("waves", schedule.waves.len());

        // Never more workers than the widest wave.
        let workers = thread_count.min(schedule.max_width()).max(1);

        if tick_count == 0 {
            self.state = SchedulerState::Idle;
            return Ok(self.stats(run_id, 0, &schedule, workers, false, started));
        }

        let pool = match self.pool(workers) {
            Ok(pool) => pool,
            Err(e) => {
                self.state = SchedulerState::Idle;
                return Err(e);
            }
        };

        let mut completed = 0;
        let mut quit_requested = false;

        for tick in 1..=tick_count {
            for (wave_index, wave) in schedule.waves.iter().enumerate() {
                self.state = SchedulerState::Executing {
                    tick,
                    wave: wave_index,
                };
                tracing::debug!(tick, wave = wave_index, cells = wave.len(), "Running wave");

                let plasm = &self.plasm;
                let outcomes = pool.run_all(wave, |&cell| (cell, run_cell(plasm, cell)));

                let mut failure = None;
                for (cell, outcome) in outcomes {
                    match outcome {
                        Ok(CellStatus::Continue) => {}
                        Ok(CellStatus::Quit) => {
                            if !quit_requested {
                                tracing::info!(cell = %cell, tick, "Cell requested quit");
                            }
                            quit_requested = true;
                        }
                        Err(cause) => {
                            if failure.is_none() {
                                failure = Some((cell, cause));
                            } else {
                                tracing::warn!(cell = %cell, tick, error = %cause, "Additional cell failure");
                            }
                        }
                    }
                }

                if let Some((cell, cause)) = failure {
                    self.state = SchedulerState::Failed;
                    self.total_ticks += completed;
                    let name = self.plasm.name(cell).unwrap_or_default().to_string();
                    tracing::error!(
                        cell = %cell,
                        name = %name,
                        tick,
                        completed_ticks = completed,
                        error = %cause,
                        "Cell failed, run stopped"
                    );
                    return Err(PlasmError::ProcessError {
                        cell,
                        name,
                        tick,
                        completed_ticks: completed,
                        cause: cause.to_string(),
                    });
                }
            }

            completed = tick;
            if quit_requested {
                break;
            }
        }

        self.total_ticks += completed;
        self.state = SchedulerState::Idle;

        let stats = self.stats(run_id, completed, &schedule, pool.threads(), quit_requested, started);
        tracing::info!(
            ticks = stats.ticks,
            total_ticks = stats.total_ticks,
            threads = stats.threads,
            quit = stats.quit_requested,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Run completed"
        );
        Ok(stats)
    }

    /// Validated schedule for the current plasm and topology version.
    fn schedule(&mut self) -> Result<Arc<Schedule>> {
        let instance = self.plasm.instance();
        let version = self.plasm.version();
        if let Some(cached) = &self.cached {
            if cached.instance == instance && cached.version == version {
                return Ok(Arc::clone(&cached.schedule));
            }
        }

        let schedule = Arc::new(self.plasm.validate()?);
        tracing::debug!(
            version,
            cells = schedule.len(),
            waves = schedule.waves.len(),
            max_width = schedule.max_width(),
            "Computed execution order"
        );
        self.cached = Some(CachedSchedule {
            instance,
            version,
            schedule: Arc::clone(&schedule),
        });
        Ok(schedule)
    }

    /// Pool for `threads` workers, reused while the count stays the same.
    fn pool(&mut self, threads: usize) -> Result<Arc<WorkerPool>> {
        if let Some(pool) = &self.pool {
            if pool.threads() == threads.max(1) {
                return Ok(Arc::clone(pool));
            }
        }
        let pool = Arc::new(WorkerPool::build(threads, &self.config)?);
        self.pool = Some(Arc::clone(&pool));
        Ok(pool)
    }

    fn stats(
        &self,
        run_id: RunId,
        ticks: u64,
        schedule: &Schedule,
        threads: usize,
        quit_requested: bool,
        started: Instant,
    ) -> RunStats {
        RunStats {
            run_id,
            ticks,
            total_ticks: self.total_ticks,
            waves: schedule.waves.len(),
            threads,
            quit_requested,
            elapsed: started.elapsed(),
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("plasm", &self.plasm)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("total_ticks", &self.total_ticks)
            .finish()
    }
}

/// Feed a cell's inputs from upstream outputs, then process it once.
fn run_cell(plasm: &Plasm, cell: CellId) -> Result<CellStatus> {
    let slot = plasm.slot(cell)?;
    let mut inputs = slot.inputs.lock();

    for conn in plasm.incoming(cell) {
        let upstream = plasm.slot(conn.from_cell)?;
        let value = upstream.outputs.read().get_value(&conn.from_port).cloned();
        if let Some(value) = value {
            inputs.set_value(&conn.to_port, value)?;
        }
    }

    let mut outputs = slot.outputs.write();
    let mut target = slot.cell.lock();

    tracing::debug!(cell = %cell, name = %slot.name, "Processing cell");
    catch_unwind(AssertUnwindSafe(|| target.process(&inputs, &mut outputs)))
        .unwrap_or_else(|payload| {
            Err(PlasmError::CellPanic {
                message: panic_message(payload.as_ref()),
            })
        })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasm_core::tendrils::Tendrils;
    use plasm_core::traits::{Cell, CellInfo, Port};
    use plasm_core::value::ValueType;

    struct Counter {
        count: i64,
    }

    impl Cell for Counter {
        fn info(&self) -> CellInfo {
            CellInfo::new("Counter").with_outputs(vec![Port::output("out", ValueType::Int)])
        }

        fn process(&mut self, _inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
            self.count += 1;
            outputs.set("out", self.count)?;
            Ok(CellStatus::Continue)
        }
    }

    struct Panicky;

    impl Cell for Panicky {
        fn info(&self) -> CellInfo {
            CellInfo::new("Panicky")
        }

        fn process(&mut self, _inputs: &Tendrils, _outputs: &mut Tendrils) -> Result<CellStatus> {
            panic!("cell blew up");
        }
    }

    #[test]
    fn zero_threads_is_rejected() {
        let mut scheduler = Scheduler::new(Plasm::new());
        let err = scheduler.execute(0, 1).unwrap_err();
        assert!(matches!(err, PlasmError::InvalidConfiguration { .. }));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn zero_ticks_is_a_no_op() {
        let mut plasm = Plasm::new();
        let c = plasm.insert(Counter { count: 0 }).unwrap();
        let mut scheduler = Scheduler::new(plasm);

        let stats = scheduler.execute(2, 0).unwrap();
        assert_eq!(stats.ticks, 0);
        assert_eq!(scheduler.total_ticks(), 0);
        assert!(scheduler.plasm().output_value(c, "out").unwrap().is_none());
    }

    #[test]
    fn empty_plasm_runs() {
        let mut scheduler = Scheduler::new(Plasm::new());
        let stats = scheduler.execute(1, 3).unwrap();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.waves, 0);
    }

    #[test]
    fn ticks_accumulate_across_runs() {
        let mut plasm = Plasm::new();
        let c = plasm.insert(Counter { count: 0 }).unwrap();
        let mut scheduler = Scheduler::new(plasm);

        scheduler.execute(1, 2).unwrap();
        let stats = scheduler.execute(1, 3).unwrap();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.total_ticks, 5);
        assert_eq!(scheduler.plasm().output::<i64>(c, "out").unwrap(), 5);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn panics_become_process_errors() {
        let mut plasm = Plasm::new();
        let p = plasm.insert_named("bomb", Panicky).unwrap();
        let mut scheduler = Scheduler::new(plasm);

        let err = scheduler.execute(1, 4).unwrap_err();
        match err {
            PlasmError::ProcessError {
                cell,
                name,
                tick,
                completed_ticks,
                cause,
            } => {
                assert_eq!(cell, p);
                assert_eq!(name, "bomb");
                assert_eq!(tick, 1);
                assert_eq!(completed_ticks, 0);
                assert!(cause.contains("cell blew up"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(scheduler.state(), SchedulerState::Failed);
    }

    #[test]
    fn order_is_cached_per_version() {
        let mut plasm = Plasm::new();
        let a = plasm.insert(Counter { count: 0 }).unwrap();
        let mut scheduler = Scheduler::new(plasm);

        assert_eq!(scheduler.execution_order().unwrap(), vec![a]);
        let b = scheduler.plasm_mut().insert(Counter { count: 0 }).unwrap();
        assert_eq!(scheduler.execution_order().unwrap(), vec![a, b]);
    }

    struct Echo;

    impl Cell for Echo {
        fn info(&self) -> CellInfo {
            CellInfo::new("Echo")
                .with_inputs(vec![Port::input("in", ValueType::Int).with_default(0_i64)])
                .with_outputs(vec![Port::output("out", ValueType::Int)])
        }

        fn process(&mut self, inputs: &Tendrils, outputs: &mut Tendrils) -> Result<CellStatus> {
            outputs.set("out", inputs.get::<i64>("in")?)?;
            Ok(CellStatus::Continue)
        }
    }

    #[test]
    fn replaced_plasm_is_scheduled_again() {
        let mut chain = Plasm::new();
        let a = chain.insert(Echo).unwrap();
        let b = chain.insert(Echo).unwrap();
        let c = chain.insert(Echo).unwrap();
        chain.connect(a, "out", b, "in").unwrap();
        chain.connect(b, "out", c, "in").unwrap();

        let mut cyclic = Plasm::new();
        let p = cyclic.insert(Echo).unwrap();
        let q = cyclic.insert(Echo).unwrap();
        cyclic.insert(Echo).unwrap();
        cyclic.connect(p, "out", q, "in").unwrap();
        cyclic.connect(q, "out", p, "in").unwrap();
        assert_eq!(chain.version(), cyclic.version());
        assert_ne!(chain.instance(), cyclic.instance());

        let mut scheduler = Scheduler::new(chain);
        scheduler.execute(1, 1).unwrap();

        *scheduler.plasm_mut() = cyclic;
        let err = scheduler.execute(1, 3).unwrap_err();
        assert!(matches!(err, PlasmError::CyclicGraph { .. }));
        assert_eq!(scheduler.total_ticks(), 1);
    }

    #[test]
    fn workers_are_capped_at_the_widest_wave() {
        let mut plasm = Plasm::new();
        let a = plasm.insert(Echo).unwrap();
        let b = plasm.insert(Echo).unwrap();
        let c = plasm.insert(Echo).unwrap();
        plasm.connect(a, "out", b, "in").unwrap();
        plasm.connect(a, "out", c, "in").unwrap();
        let mut scheduler = Scheduler::new(plasm);

        let stats = scheduler.execute(16, 2).unwrap();
        assert_eq!(stats.threads, 2);
        assert_eq!(scheduler.execute(16, 0).unwrap().threads, 2);
        assert_eq!(scheduler.execute(1, 1).unwrap().threads, 1);
    }

    #[test]
    fn pool_is_reused_for_same_thread_count() {
        let mut scheduler = Scheduler::new(Plasm::new());
        let first = scheduler.pool(3).unwrap();
        let second = scheduler.pool(3).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        let third = scheduler.pool(2).unwrap();
        assert_eq!(third.threads(), 2);
    }
}
