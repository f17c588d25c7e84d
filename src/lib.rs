// Genome - structural summaries of a source repository
//!
//! Pattern-based analyzers turn each source or data file into a
//! [`StructuralSummary`]; the [`engine`] fans extraction out over worker
//! threads; the [`genome`] module aggregates and persists the results; the
//! [`watcher`] keeps the persisted genome fresh as files change.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod genome;
pub mod watcher;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use config::GenomeConfig;
pub use engine::{ExecutionEngine, ExecutionReport, Strategy};
pub use error::{ExtractionError, ExtractionTaskError, GenomeError};
pub use extractors::{analyze, Language, StructuralSummary};
pub use watcher::ChangeWatcher;
