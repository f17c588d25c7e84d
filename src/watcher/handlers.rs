//! Regeneration handler
//!
//! Each flush builds a fresh pipeline from the factory, runs it incrementally
//! over the changed paths and persists the result.

use super::debounce::FlushFn;
use super::types::ChangeSet;
use crate::error::{GenomeError, Result};
use crate::genome::Pipeline;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Builds a new pipeline for every regeneration
pub type PipelineFactory = dyn Fn() -> Result<Box<dyn Pipeline>> + Send + Sync;

pub fn regenerate(factory: &PipelineFactory, changed: &ChangeSet) -> Result<()> {
    let started = Instant::now();
    let mut pipeline = factory().map_err(regeneration_error)?;
    let genome = pipeline
        .generate(true, changed)
        .map_err(regeneration_error)?;
    let output = pipeline.output_path();
    genome.save(&output).map_err(regeneration_error)?;
    info!(
        "✅ Genome updated ({} files) in {:.2}s",
        genome.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn regeneration_error(e: GenomeError) -> GenomeError {
    match e {
        GenomeError::Regeneration(_) => e,
        other => GenomeError::Regeneration(other.to_string()),
    }
}

/// Flush callback that regenerates through `factory`
pub fn regeneration_callback(factory: Arc<PipelineFactory>) -> Arc<FlushFn> {
    Arc::new(move |changed: ChangeSet| regenerate(factory.as_ref(), &changed))
}
