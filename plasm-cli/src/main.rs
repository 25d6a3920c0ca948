//! Plasm CLI - run, render and demo plasm dataflow graphs.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plasm_executor::observability::{TracingConfig, TracingGuard, init_tracing, verbosity_filter};
use std::path::PathBuf;

/// Plasm - tick-driven dataflow graphs executed in parallel waves.
#[derive(Parser)]
#[command(name = "plasm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a plasm from a YAML file and execute it
    Run {
        /// Path to the plasm YAML file
        file: PathBuf,

        /// Worker threads (defaults to PLASM_THREADS or the CPU count)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Ticks per run
        #[arg(short = 'n', long, default_value = "1")]
        ticks: u64,

        /// Number of consecutive runs
        #[arg(short, long, default_value = "1")]
        repeat: u32,
    },

    /// Render the topology of a plasm YAML file as Graphviz DOT
    Viz {
        /// Path to the plasm YAML file
        file: PathBuf,

        /// Write the DOT text to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build and run the generator / incrementer / adder / printer demo
    Demo {
        /// Extra incrementer stages per chain
        #[arg(short, long, default_value = "0")]
        depth: usize,

        /// Worker threads
        #[arg(short, long, default_value = "1")]
        threads: usize,

        /// Ticks per run
        #[arg(short = 'n', long, default_value = "5")]
        ticks: u64,

        /// Number of consecutive runs
        #[arg(short, long, default_value = "2")]
        repeat: u32,

        /// Also write the demo topology as DOT to this file
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn setup_logging(verbosity: u8) -> Result<TracingGuard> {
    let config = TracingConfig::from_env()?.or_filter(verbosity_filter(verbosity));
    init_tracing(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _tracing_guard = setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            file,
            threads,
            ticks,
            repeat,
        } => commands::run::run(&file, threads, ticks, repeat),
        Commands::Viz { file, output } => commands::viz::run(&file, output.as_deref()),
        Commands::Demo {
            depth,
            threads,
            ticks,
            repeat,
            dot,
        } => commands::demo::run(&commands::demo::DemoOptions {
            depth,
            threads,
            ticks,
            repeat,
            dot,
        }),
        Commands::Version => commands::version::run(),
    }
}
