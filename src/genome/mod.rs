//! The aggregate index ("genome")
//!
//! Per-file summaries keyed by repository-relative path, plus roll-up stats.
//! Persisted as pretty JSON; written through a temporary file and renamed so a
//! crash mid-write never leaves a truncated genome behind.

pub mod discovery;
pub mod pipeline;

use crate::error::{GenomeError, Result};
use crate::extractors::StructuralSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use pipeline::{GenomePipeline, Pipeline};

pub const GENOME_FORMAT_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileEntry {
    /// blake3 of the file bytes at analysis time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(flatten)]
    pub summary: StructuralSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenomeStats {
    pub files: usize,
    pub functions: usize,
    pub types: usize,
    pub imports: usize,
    pub entry_point_files: usize,
    pub files_with_errors: usize,
    pub languages: BTreeMap<String, usize>,
}

impl GenomeStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            let summary = &entry.summary;
            stats.files += 1;
            stats.functions += summary.functions.len();
            stats.types += summary.types.len();
            stats.imports += summary.imports.len();
            stats.entry_point_files += usize::from(summary.has_entry_point());
            stats.files_with_errors += usize::from(summary.is_degraded());
            *stats.languages.entry(summary.language.clone()).or_default() += 1;
        }
        stats
    }

    /// Fold another partial tally into this one
    pub fn absorb(&mut self, other: GenomeStats) {
        self.files += other.files;
        self.functions += other.functions;
        self.types += other.types;
        self.imports += other.imports;
        self.entry_point_files += other.entry_point_files;
        self.files_with_errors += other.files_with_errors;
        for (language, count) in other.languages {
            *self.languages.entry(language).or_default() += count;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genome {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub root: PathBuf,
    pub files: BTreeMap<String, FileEntry>,
    pub stats: GenomeStats,
}

impl Genome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            version: GENOME_FORMAT_VERSION.to_string(),
            generated_at: Utc::now(),
            root: root.into(),
            files: BTreeMap::new(),
            stats: GenomeStats::default(),
        }
    }

    /// Insert or replace the summary for `path`
    pub fn merge(
        &mut self,
        path: impl Into<String>,
        summary: StructuralSummary,
        content_hash: Option<String>,
    ) {
        self.files.insert(
            path.into(),
            FileEntry {
                content_hash,
                summary,
            },
        );
    }

    pub fn remove(&mut self, path: &str) -> Option<FileEntry> {
        self.files.remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Replace stats and timestamp after a round of merges
    pub fn finalize(&mut self, stats: GenomeStats) {
        self.stats = stats;
        self.generated_at = Utc::now();
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        info!(
            "Saved genome with {} files to {}",
            self.files.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let genome: Genome = serde_json::from_str(&text)?;
        if genome.version != GENOME_FORMAT_VERSION {
            return Err(GenomeError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: genome.version,
            });
        }
        debug!("Loaded genome with {} files from {}", genome.files.len(), path.display());
        Ok(genome)
    }
}
