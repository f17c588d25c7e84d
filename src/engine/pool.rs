//! Isolated worker pool for large batches
//!
//! A feeder thread pushes owned `(index, FileTask)` jobs into a bounded queue;
//! a fixed set of worker threads pull from it and send owned outcomes back.
//! The extractor is shared behind an `Arc` and must be `'static`, so no
//! borrow of the caller's data can cross into a worker.

use super::{run_task, unfilled_slot, FileOutcome, FileTask, ProgressFn};
use crate::extractors::StructuralSummary;
use std::fmt::Display;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, warn};

type Job = (usize, FileTask);

/// Queue slots per worker before the feeder blocks
const QUEUE_DEPTH_PER_WORKER: usize = 2;

pub(super) fn run_isolated<F, E>(
    tasks: Vec<FileTask>,
    workers: usize,
    extract: Arc<F>,
    progress: Option<&ProgressFn>,
) -> Vec<FileOutcome>
where
    F: Fn(&Path) -> Result<StructuralSummary, E> + Send + Sync + 'static,
    E: Display + 'static,
{
    let total = tasks.len();
    let (job_tx, job_rx) = mpsc::sync_channel::<Job>(workers * QUEUE_DEPTH_PER_WORKER);
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (result_tx, result_rx) = mpsc::channel::<(usize, FileOutcome)>();

    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        let job_rx = Arc::clone(&job_rx);
        let result_tx = result_tx.clone();
        let extract = Arc::clone(&extract);
        let spawned = thread::Builder::new()
            .name(format!("genome-worker-{}", id))
            .spawn(move || worker_loop(&job_rx, &result_tx, extract.as_ref()));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => warn!("Failed to spawn worker {}: {}", id, e),
        }
    }
    drop(result_tx);

    if handles.is_empty() {
        warn!("No worker threads available, running {} tasks inline", total);
        return run_inline(&tasks, extract.as_ref(), progress);
    }
    debug!("Started {} isolated workers", handles.len());

    let placeholders: Vec<FileOutcome> = tasks.iter().map(unfilled_slot).collect();
    let feeder = thread::Builder::new()
        .name("genome-feeder".to_string())
        .spawn(move || feed(job_tx, tasks));
    let feeder = match feeder {
        Ok(handle) => Some(handle),
        Err(e) => {
            // Without a feeder no job is ever queued; workers exit once the queue closes
            warn!("Failed to spawn task feeder: {}", e);
            None
        }
    };

    let mut slots: Vec<Option<FileOutcome>> = (0..total).map(|_| None).collect();
    let mut completed = 0;
    for (index, outcome) in result_rx {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(outcome);
            completed += 1;
            if let Some(progress) = progress {
                progress(completed, total);
            }
        }
        if completed == total {
            break;
        }
    }

    if let Some(feeder) = feeder {
        if feeder.join().is_err() {
            warn!("Task feeder panicked");
        }
    }
    for handle in handles {
        if handle.join().is_err() {
            warn!("Worker thread panicked outside a task");
        }
    }

    slots
        .into_iter()
        .zip(placeholders)
        .map(|(slot, placeholder)| slot.unwrap_or(placeholder))
        .collect()
}

fn feed(job_tx: SyncSender<Job>, tasks: Vec<FileTask>) {
    for job in tasks.into_iter().enumerate() {
        if job_tx.send(job).is_err() {
            break;
        }
    }
}

fn worker_loop<F, E>(
    job_rx: &Mutex<Receiver<Job>>,
    result_tx: &mpsc::Sender<(usize, FileOutcome)>,
    extract: &F,
) where
    F: Fn(&Path) -> Result<StructuralSummary, E>,
    E: Display,
{
    loop {
        let job = {
            let rx = job_rx.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rx.recv()
        };
        let Ok((index, task)) = job else {
            break;
        };
        let outcome = run_task(extract, &task);
        if result_tx.send((index, outcome)).is_err() {
            break;
        }
    }
}

fn run_inline<F, E>(
    tasks: &[FileTask],
    extract: &F,
    progress: Option<&ProgressFn>,
) -> Vec<FileOutcome>
where
    F: Fn(&Path) -> Result<StructuralSummary, E>,
    E: Display,
{
    let total = tasks.len();
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let outcome = run_task(extract, task);
            if let Some(progress) = progress {
                progress(index + 1, total);
            }
            outcome
        })
        .collect()
}
