//! Genome generation pipeline
//!
//! Full runs discover every analyzable file and build a fresh genome.
//! Incremental runs load the persisted genome and only touch the files named
//! in the change set: files that still exist are re-analyzed (skipped when the
//! content hash is unchanged) and the rest are removed.

use super::discovery::{DiscoveredFile, Discovery};
use super::{Genome, GenomeStats};
use crate::config::GenomeConfig;
use crate::engine::{ExecutionEngine, ProgressFn};
use crate::error::{GenomeError, Result};
use crate::extractors::{self, StructuralSummary};
use crate::watcher::filtering::{to_relative_unix_style, IgnoreSet};
use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Something that can (re)build a genome. The watcher creates a fresh one per
/// regeneration through a factory.
pub trait Pipeline: Send {
    fn generate(&mut self, incremental: bool, changed: &BTreeSet<String>) -> Result<Genome>;

    /// Where the generated genome should be saved
    fn output_path(&self) -> PathBuf;
}

pub struct GenomePipeline {
    root: PathBuf,
    config: GenomeConfig,
    engine: ExecutionEngine,
    discovery: Discovery,
    progress: Option<Arc<ProgressFn>>,
}

impl std::fmt::Debug for GenomePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenomePipeline")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl GenomePipeline {
    pub fn new(root: &Path, config: GenomeConfig) -> Result<Self> {
        config.validate()?;
        let root = root.canonicalize()?;
        let engine = ExecutionEngine::from_config(&config)?;

        let mut ignore = IgnoreSet::new(config.ignore_patterns.iter().cloned());
        if let Some(output) = to_relative_unix_style(&config.output_path(&root), &root) {
            ignore = ignore.with_pattern(output);
        }
        let discovery = Discovery::new(root.clone(), ignore, config.max_file_size);

        Ok(Self {
            root,
            config,
            engine,
            discovery,
            progress: None,
        })
    }

    pub fn with_progress(mut self, progress: Arc<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &GenomeConfig {
        &self.config
    }

    /// Every discoverable file plus everything recorded in the persisted
    /// genome. Passed as the change set, it makes an incremental run re-check
    /// all hashes and drop files deleted while nobody was watching.
    pub fn refresh_set(&self) -> BTreeSet<String> {
        let mut paths: BTreeSet<String> = self
            .discovery
            .discover()
            .into_iter()
            .map(|f| f.relative)
            .collect();
        if let Ok(existing) = Genome::load(&self.output_path()) {
            paths.extend(existing.files.into_keys());
        }
        paths
    }

    pub fn full(&self) -> Result<Genome> {
        let started = Instant::now();
        info!("🧬 Generating genome for {}", self.root.display());

        let files = self.discovery.discover();
        let mut genome = Genome::new(&self.root);
        for (relative, summary, hash) in self.analyze_files(&files) {
            genome.merge(relative, summary, hash);
        }
        let stats = self.compute_stats(&genome);
        genome.finalize(stats);

        info!(
            "✅ Genome generated: {} files, {} functions, {} types in {:.2}s",
            genome.stats.files,
            genome.stats.functions,
            genome.stats.types,
            started.elapsed().as_secs_f64()
        );
        Ok(genome)
    }

    pub fn incremental(&self, changed: &BTreeSet<String>) -> Result<Genome> {
        let output = self.output_path();
        let mut genome = match Genome::load(&output) {
            Ok(genome) => genome,
            Err(GenomeError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!("No existing genome at {}, running full generation", output.display());
                return self.full();
            }
            Err(e) => {
                warn!("Existing genome unusable ({}), running full generation", e);
                return self.full();
            }
        };
        genome.root = self.root.clone();

        let mut to_analyze = Vec::new();
        let mut removed = 0;
        for relative in changed {
            let path = self.root.join(relative);
            let analyzable =
                !self.discovery.ignore().is_ignored(relative) && self.discovery.accepts(&path);
            if !analyzable {
                if genome.remove(relative).is_some() {
                    removed += 1;
                }
                continue;
            }
            let unchanged = match (genome.get(relative), content_hash(&path)) {
                (Some(entry), Some(hash)) => entry.content_hash.as_deref() == Some(hash.as_str()),
                _ => false,
            };
            if unchanged {
                debug!("{} unchanged since last generation", relative);
                continue;
            }
            to_analyze.push(DiscoveredFile {
                path,
                relative: relative.clone(),
            });
        }

        let updated = to_analyze.len();
        for (relative, summary, hash) in self.analyze_files(&to_analyze) {
            genome.merge(relative, summary, hash);
        }
        let stats = self.compute_stats(&genome);
        genome.finalize(stats);

        info!(
            "🔄 Incremental update: {} re-analyzed, {} removed, {} files total",
            updated,
            removed,
            genome.len()
        );
        Ok(genome)
    }

    /// Run the engine over `files` and pair each summary with its content hash.
    /// Files whose task failed are left out.
    fn analyze_files(
        &self,
        files: &[DiscoveredFile],
    ) -> Vec<(String, StructuralSummary, Option<String>)> {
        if files.is_empty() {
            return Vec::new();
        }
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
        let report = self.engine.process_outcomes(
            &paths,
            |path: &Path| Ok::<_, Infallible>(extractors::analyze(path)),
            self.progress.as_deref(),
        );
        for failure in report.failures() {
            warn!("{}", failure);
        }

        let mut hashes = self.hash_files(files);
        files
            .iter()
            .zip(report.outcomes)
            .filter_map(|(file, outcome)| {
                let summary = outcome.ok()?;
                let hash = hashes.remove(&file.relative);
                Some((file.relative.clone(), summary, hash))
            })
            .collect()
    }

    fn hash_files(&self, files: &[DiscoveredFile]) -> HashMap<String, String> {
        let refs: Vec<&DiscoveredFile> = files.iter().collect();
        let batches = self.engine.process_batches(&refs, self.config.batch_size, |batch| {
            Ok::<_, Infallible>(
                batch
                    .iter()
                    .filter_map(|f| content_hash(&f.path).map(|h| (f.relative.clone(), h)))
                    .collect::<Vec<_>>(),
            )
        });
        match batches {
            Ok(batches) => batches.into_iter().flatten().collect(),
            Err(e) => {
                warn!("Skipping content hashes: {}", e);
                HashMap::new()
            }
        }
    }

    fn compute_stats(&self, genome: &Genome) -> GenomeStats {
        let entries: Vec<_> = genome.files.values().collect();
        let partials = self.engine.process_batches(&entries, self.config.batch_size, |batch| {
            Ok::<_, Infallible>(GenomeStats::from_entries(batch.iter().copied()))
        });
        let mut stats = GenomeStats::default();
        match partials {
            Ok(partials) => {
                for partial in partials {
                    stats.absorb(partial);
                }
            }
            Err(e) => {
                warn!("Batched stats failed ({}), counting inline", e);
                stats = GenomeStats::from_entries(entries.iter().copied());
            }
        }
        if stats.files != genome.len() {
            warn!(
                "Stats cover {} of {} files (a batch was dropped)",
                stats.files,
                genome.len()
            );
        }
        stats
    }
}

impl Pipeline for GenomePipeline {
    fn generate(&mut self, incremental: bool, changed: &BTreeSet<String>) -> Result<Genome> {
        if incremental {
            self.incremental(changed)
        } else {
            self.full()
        }
    }

    fn output_path(&self) -> PathBuf {
        self.config.output_path(&self.root)
    }
}

/// blake3 of the file bytes, hex encoded
pub fn content_hash(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    Some(hex::encode(blake3::hash(&bytes).as_bytes()))
}
