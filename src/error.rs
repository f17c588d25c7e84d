//! Error taxonomy for extraction, execution, configuration and regeneration.
//!
//! Read and parse failures never leave an analyzer: the registry converts them
//! into a degraded [`StructuralSummary`](crate::extractors::StructuralSummary).
//! Task failures are isolated per slot by the engine, and regeneration failures
//! are logged by the watcher without stopping it.

use std::path::PathBuf;
use thiserror::Error;

/// Category tag carried by every extraction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File unreadable or not valid UTF-8
    ReadError,
    /// Structured-data file is malformed
    ParseError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ReadError => "read-error",
            ErrorKind::ParseError => "parse-error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure produced inside an analyzer (`FileReadError` / `ParseError`)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ExtractionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ExtractionError {
    pub fn read(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ReadError,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ParseError,
            message: message.into(),
        }
    }
}

/// A task that failed inside the engine (error return or panic)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task-error: {path}: {message}")]
pub struct ExtractionTaskError {
    pub path: PathBuf,
    pub message: String,
}

/// Invalid configuration rejected at the boundary
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("debounce interval must be > 0 seconds, got {0}")]
    InvalidDebounce(f64),

    #[error("max workers must be at least 1")]
    InvalidWorkerCount,

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("ignore patterns must not be empty strings")]
    EmptyIgnorePattern,

    #[error("failed to parse config file {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Errors raised while building, loading or persisting the genome
#[derive(Debug, Error)]
pub enum GenomeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unsupported genome format version {found} in {path}")]
    UnsupportedVersion { path: PathBuf, found: String },

    #[error("Regeneration failed: {0}")]
    Regeneration(String),
}

pub type Result<T> = std::result::Result<T, GenomeError>;
