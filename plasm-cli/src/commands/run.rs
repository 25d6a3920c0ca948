//! Run command - load a plasm YAML file and execute it.

use anyhow::{Context, Result};
use plasm_cells::standard_registry;
use plasm_executor::loader::PlasmLoader;
use plasm_executor::scheduler::{RunStats, Scheduler, SchedulerConfig};
use std::path::Path;

/// Run the run command.
pub fn run(file: &Path, threads: Option<usize>, ticks: u64, repeat: u32) -> Result<()> {
    let config = SchedulerConfig::from_env().context("Invalid scheduler environment")?;

    tracing::info!(
        file = %file.display(),
        threads = threads.unwrap_or(config.default_threads),
        ticks,
        repeat,
        "Running plasm"
    );

    let loader = PlasmLoader::new(standard_registry());
    let loaded = loader
        .load_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let name = loaded.name().to_string();

    let mut scheduler = Scheduler::with_config(loaded.plasm, config);
    let runs = execute_repeated(&mut scheduler, threads, ticks, repeat)?;

    for (index, stats) in runs.iter().enumerate() {
        print_stats(&name, index + 1, stats);
    }
    Ok(())
}

/// Execute `repeat` runs, stopping early when a cell asks to quit.
///
/// Without `threads` the scheduler's configured default is used.
pub fn execute_repeated(
    scheduler: &mut Scheduler,
    threads: Option<usize>,
    ticks: u64,
    repeat: u32,
) -> Result<Vec<RunStats>> {
    let mut runs = Vec::new();
    for run in 1..=repeat {
        let stats = match threads {
            Some(threads) => scheduler.execute(threads, ticks),
            None => scheduler.execute_default(ticks),
        };
        let stats = stats.with_context(|| format!("Run {} of {} failed", run, repeat))?;
        let quit = stats.quit_requested;
        runs.push(stats);
        if quit {
            tracing::info!(run, "Plasm requested quit, skipping remaining runs");
            break;
        }
    }
    Ok(runs)
}

/// Print the summary line for one run.
pub fn print_stats(name: &str, run: usize, stats: &RunStats) {
    println!(
        "{} run {}: {} ticks ({} total) on {} threads, {} waves in {:.2?}{}",
        name,
        run,
        stats.ticks,
        stats.total_ticks,
        stats.threads,
        stats.waves,
        stats.elapsed,
        if stats.quit_requested { ", quit" } else { "" }
    );
}
