//! Command-line support for the `genome` binary
//!
//! - output: JSON / NDJSON rendering of summaries on stdout
//! - progress: throttled progress reporting on stderr
//!
//! Config resolution lives here so the binary stays a thin clap wrapper.

pub mod output;
pub mod progress;

pub use output::{OutputFormat, OutputWriter};
pub use progress::{ProgressEvent, ProgressReporter};

use crate::config::GenomeConfig;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Values given on the command line; `None` keeps the file/default value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
    pub batch_size: Option<usize>,
    pub debounce_secs: Option<f64>,
    pub ignore: Vec<String>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: GenomeConfig) -> Result<GenomeConfig, ConfigError> {
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(workers) = self.workers {
            config.max_workers = workers;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(debounce) = self.debounce_secs {
            config.debounce_secs = debounce;
        }
        config.ignore_patterns.extend(self.ignore);
        config.validate()?;
        Ok(config)
    }
}

/// `.genome/config.toml` under `root` (if any), then CLI overrides, then validation
pub fn resolve_config(root: &Path, overrides: ConfigOverrides) -> Result<GenomeConfig, ConfigError> {
    let config = GenomeConfig::load_or_default(root)?;
    overrides.apply(config)
}
