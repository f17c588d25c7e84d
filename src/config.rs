//! Genome configuration
//!
//! Every knob is supplied by the caller (defaults are public and documented),
//! and [`GenomeConfig::validate`] is the single boundary check. The optional
//! `.genome/config.toml` file is merged under CLI overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Directory holding genome data inside a repository
pub const GENOME_DIR: &str = ".genome";
/// Default genome output, relative to the repository root
pub const DEFAULT_OUTPUT: &str = ".genome/genome.json";
pub const DEFAULT_DEBOUNCE_SECS: f64 = 2.0;
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Upper bound on the default worker count
pub const MAX_DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenomeConfig {
    /// Substrings; any path containing one is skipped by discovery and the watcher
    pub ignore_patterns: Vec<String>,

    /// Quiescence window for the watcher, in seconds
    pub debounce_secs: f64,

    /// Worker count for the execution engine
    pub max_workers: usize,

    /// Items per batch for batch-mode processing
    pub batch_size: usize,

    /// Where the genome is persisted, relative to the root unless absolute
    pub output: PathBuf,

    /// Files larger than this are skipped during discovery (bytes)
    pub max_file_size: u64,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: default_ignore_patterns(),
            debounce_secs: DEFAULT_DEBOUNCE_SECS,
            max_workers: default_worker_count(),
            batch_size: DEFAULT_BATCH_SIZE,
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_file_size: 1024 * 1024,
        }
    }
}

/// Build/VCS/dependency directories plus our own data directory. Each ends in
/// `/` so files such as `build.rs` or `src/distance.py` still match nothing.
pub fn default_ignore_patterns() -> Vec<String> {
    let mut patterns: Vec<String> = [
        ".git/",
        "node_modules/",
        "target/",
        "__pycache__/",
        ".venv/",
        "dist/",
        "build/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    patterns.push(format!("{}/", GENOME_DIR));
    patterns
}

/// `min(available parallelism, 8)`, never below 1
pub fn default_worker_count() -> usize {
    worker_count_for(num_cpus::get())
}

pub fn worker_count_for(available: usize) -> usize {
    available.clamp(1, MAX_DEFAULT_WORKERS)
}

impl GenomeConfig {
    /// Reject values the engine and watcher cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.debounce_secs.is_finite() || self.debounce_secs <= 0.0 {
            return Err(ConfigError::InvalidDebounce(self.debounce_secs));
        }
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidWorkerCount);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.ignore_patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyIgnorePattern);
        }
        Ok(())
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_secs_f64(self.debounce_secs)
    }

    /// Output path resolved against the repository root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            root.join(&self.output)
        }
    }

    /// Load `<root>/.genome/config.toml` if present, defaults otherwise
    pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(GENOME_DIR).join("config.toml");
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let malformed = |message: String| ConfigError::Malformed {
            path: path.to_path_buf(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        let config: Self = toml::from_str(&text).map_err(|e| malformed(e.to_string()))?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
