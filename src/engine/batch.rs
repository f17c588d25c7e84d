//! Batch mode for aggregation workloads
//!
//! Items are cut into contiguous batches and each batch goes to a
//! caller-supplied processor on the shared-memory pool. A single batch is run
//! inline. A batch whose processor errors or panics is left out of the
//! result, and the surviving results keep batch order.

use super::{panic_message, ExecutionEngine};
use crate::error::ConfigError;
use rayon::prelude::*;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

impl ExecutionEngine {
    pub fn process_batches<T, R, E, F>(
        &self,
        items: &[T],
        batch_size: usize,
        processor: F,
    ) -> Result<Vec<R>, ConfigError>
    where
        T: Sync,
        R: Send,
        E: Display,
        F: Fn(&[T]) -> Result<R, E> + Sync,
    {
        if batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<&[T]> = items.chunks(batch_size).collect();
        if batches.len() == 1 {
            debug!("Single batch of {} items, running inline", items.len());
            return Ok(run_batch(&processor, 0, batches[0]).into_iter().collect());
        }

        debug!(
            "Dispatching {} batches of up to {} items",
            batches.len(),
            batch_size
        );
        let workers = self.max_workers().min(batches.len());
        let results: Vec<Option<R>> = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("genome-batch-{}", i))
            .build()
        {
            Ok(pool) => pool.install(|| {
                batches
                    .par_iter()
                    .enumerate()
                    .map(|(index, batch)| run_batch(&processor, index, *batch))
                    .collect()
            }),
            Err(e) => {
                warn!("Failed to build batch pool, running inline: {}", e);
                batches
                    .iter()
                    .enumerate()
                    .map(|(index, batch)| run_batch(&processor, index, *batch))
                    .collect()
            }
        };

        Ok(results.into_iter().flatten().collect())
    }
}

fn run_batch<T, R, E, F>(processor: &F, index: usize, batch: &[T]) -> Option<R>
where
    E: Display,
    F: Fn(&[T]) -> Result<R, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| processor(batch))) {
        Ok(Ok(result)) => Some(result),
        Ok(Err(e)) => {
            warn!("Batch {} ({} items) failed: {}", index, batch.len(), e);
            None
        }
        Err(payload) => {
            warn!(
                "Batch {} ({} items) panicked: {}",
                index,
                batch.len(),
                panic_message(payload.as_ref())
            );
            None
        }
    }
}
