//! Parallel execution engine
//!
//! Runs an extraction function over a list of files and returns results in
//! submission order, whatever order the workers finish in. Small batches run
//! on a rayon pool sharing the caller's memory; batches of
//! [`ISOLATION_THRESHOLD`] files or more go through an explicit bounded task
//! queue feeding dedicated worker threads, where tasks and results cross the
//! boundary by value only.
//!
//! A task that errors or panics is recorded in its own slot. Siblings keep
//! running. Two surfaces are exposed:
//! - [`ExecutionEngine::process`] drops failed slots (results only)
//! - [`ExecutionEngine::process_outcomes`] keeps one outcome per file

mod batch;
mod pool;

use crate::config::{self, GenomeConfig};
use crate::error::{ConfigError, ExtractionTaskError};
use crate::extractors::StructuralSummary;
use rayon::prelude::*;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Batches at or above this size use isolated workers
pub const ISOLATION_THRESHOLD: usize = 10;

/// Concurrency substrate chosen for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Rayon pool, closures share the caller's memory
    SharedMemory,
    /// Bounded task queue plus dedicated worker threads, plain data in and out
    Isolated,
}

impl Strategy {
    pub fn for_batch(len: usize) -> Self {
        if len < ISOLATION_THRESHOLD {
            Strategy::SharedMemory
        } else {
            Strategy::Isolated
        }
    }
}

/// Unit of work submitted to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub path: PathBuf,
}

/// Per-file result: a summary, or the failure marker for that slot
pub type FileOutcome = Result<StructuralSummary, ExtractionTaskError>;

/// Progress callback, invoked with `(completed, total)` after every completion
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Full per-slot accounting for one `process_outcomes` call
#[derive(Debug)]
pub struct ExecutionReport {
    /// `None` when the input was empty and no workers were involved
    pub strategy: Option<Strategy>,
    /// `outcomes[i]` belongs to `files[i]`
    pub outcomes: Vec<FileOutcome>,
}

impl ExecutionReport {
    pub fn failures(&self) -> impl Iterator<Item = &ExtractionTaskError> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Successful summaries in submission order
    pub fn into_summaries(self) -> Vec<StructuralSummary> {
        self.outcomes.into_iter().filter_map(Result::ok).collect()
    }

    /// `(path, summary)` pairs for successful slots, in submission order
    pub fn into_pairs(self, files: &[PathBuf]) -> Vec<(PathBuf, StructuralSummary)> {
        files
            .iter()
            .cloned()
            .zip(self.outcomes)
            .filter_map(|(path, outcome)| outcome.ok().map(|summary| (path, summary)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    max_workers: usize,
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self {
            max_workers: config::default_worker_count(),
        }
    }
}

impl ExecutionEngine {
    pub fn new(max_workers: usize) -> Result<Self, ConfigError> {
        if max_workers == 0 {
            return Err(ConfigError::InvalidWorkerCount);
        }
        Ok(Self { max_workers })
    }

    pub fn from_config(config: &GenomeConfig) -> Result<Self, ConfigError> {
        Self::new(config.max_workers)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Results-only surface: failed files are dropped, order is preserved
    pub fn process<F, E>(
        &self,
        files: &[PathBuf],
        extract: F,
        progress: Option<&ProgressFn>,
    ) -> Vec<StructuralSummary>
    where
        F: Fn(&Path) -> Result<StructuralSummary, E> + Send + Sync + 'static,
        E: Display + 'static,
    {
        let report = self.process_outcomes(files, extract, progress);
        let failures = report.failure_count();
        if failures > 0 {
            warn!("Dropping {} failed extraction(s) from results", failures);
        }
        report.into_summaries()
    }

    /// Full surface: one outcome per submitted file
    pub fn process_outcomes<F, E>(
        &self,
        files: &[PathBuf],
        extract: F,
        progress: Option<&ProgressFn>,
    ) -> ExecutionReport
    where
        F: Fn(&Path) -> Result<StructuralSummary, E> + Send + Sync + 'static,
        E: Display + 'static,
    {
        if files.is_empty() {
            return ExecutionReport {
                strategy: None,
                outcomes: Vec::new(),
            };
        }

        let strategy = Strategy::for_batch(files.len());
        let workers = self.max_workers.min(files.len());
        let started = Instant::now();
        info!(
            "Processing {} files with {:?} strategy on {} worker(s)",
            files.len(),
            strategy,
            workers
        );

        let tasks: Vec<FileTask> = files
            .iter()
            .map(|path| FileTask { path: path.clone() })
            .collect();

        let outcomes = match strategy {
            Strategy::SharedMemory => run_shared(tasks, workers, &extract, progress),
            Strategy::Isolated => pool::run_isolated(tasks, workers, Arc::new(extract), progress),
        };

        let report = ExecutionReport {
            strategy: Some(strategy),
            outcomes,
        };
        debug!(
            "Processed {} files in {:.2}s ({} failed)",
            files.len(),
            started.elapsed().as_secs_f64(),
            report.failure_count()
        );
        report
    }
}

/// Run one task, turning an error return or a panic into a slot failure
pub(crate) fn run_task<F, E>(extract: &F, task: &FileTask) -> FileOutcome
where
    F: Fn(&Path) -> Result<StructuralSummary, E>,
    E: Display,
{
    match panic::catch_unwind(AssertUnwindSafe(|| extract(&task.path))) {
        Ok(Ok(summary)) => Ok(summary),
        Ok(Err(e)) => Err(ExtractionTaskError {
            path: task.path.clone(),
            message: e.to_string(),
        }),
        Err(payload) => Err(ExtractionTaskError {
            path: task.path.clone(),
            message: format!("extractor panicked: {}", panic_message(payload.as_ref())),
        }),
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Pre-sized slots, one per task
fn unfilled_slot(task: &FileTask) -> FileOutcome {
    Err(ExtractionTaskError {
        path: task.path.clone(),
        message: "task did not complete".to_string(),
    })
}

fn run_shared<F, E>(
    tasks: Vec<FileTask>,
    workers: usize,
    extract: &F,
    progress: Option<&ProgressFn>,
) -> Vec<FileOutcome>
where
    F: Fn(&Path) -> Result<StructuralSummary, E> + Send + Sync,
    E: Display,
{
    let total = tasks.len();
    let slots: Mutex<Vec<Option<FileOutcome>>> = Mutex::new(vec![None; total]);
    let completed = AtomicUsize::new(0);

    let run_one = |index: usize, task: &FileTask| {
        let outcome = run_task(extract, task);
        {
            let mut slots = slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            slots[index] = Some(outcome);
        }
        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(progress) = progress {
            progress(done, total);
        }
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("genome-shared-{}", i))
        .build()
    {
        Ok(pool) => pool.install(|| {
            tasks
                .par_iter()
                .enumerate()
                .for_each(|(index, task)| run_one(index, task));
        }),
        Err(e) => {
            warn!("Failed to build worker pool, running inline: {}", e);
            for (index, task) in tasks.iter().enumerate() {
                run_one(index, task);
            }
        }
    }

    let slots = slots.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    slots
        .into_iter()
        .zip(&tasks)
        .map(|(slot, task)| slot.unwrap_or_else(|| unfilled_slot(task)))
        .collect()
}
