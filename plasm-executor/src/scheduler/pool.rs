//! Worker pool that runs one wave of cells at a time.

use super::config::SchedulerConfig;
use plasm_core::error::{PlasmError, Result};
use rayon::prelude::*;

/// A fixed-size pool of worker threads.
///
/// A single-threaded pool spawns nothing and runs every job on the caller.
pub(crate) struct WorkerPool {
    threads: usize,
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// Build a pool with `threads` workers.
    pub(crate) fn build(threads: usize, config: &SchedulerConfig) -> Result<Self> {
        if threads <= 1 {
            return Ok(Self {
                threads: 1,
                pool: None,
            });
        }

        let prefix = config.thread_name_prefix.clone();
        let mut builder = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |index| format!("{}-{}", prefix, index));
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let pool = builder
            .build()
            .map_err(|e| PlasmError::InvalidConfiguration {
                field: "thread_count".to_string(),
                cause: e.to_string(),
            })?;

        tracing::debug!(threads, "Built worker pool");
        Ok(Self {
            threads,
            pool: Some(pool),
        })
    }

    /// Number of workers.
    pub(crate) fn threads(&self) -> usize {
        self.threads
    }

    /// Run `job` for every item and return the results in item order.
    ///
    /// Returns only after every job has finished, which is the wave barrier.
    pub(crate) fn run_all<T, R, F>(&self, items: &[T], job: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        match &self.pool {
            Some(pool) if items.len() > 1 => {
                pool.install(|| items.par_iter().with_max_len(1).map(&job).collect())
            }
            _ => items.iter().map(job).collect(),
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .finish()
    }
}
