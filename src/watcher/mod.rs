//! Incremental change watcher
//!
//! notify delivers raw events on its own thread; they are forwarded over an
//! unbounded tokio channel to an event task which filters them and feeds the
//! [`Debouncer`]. Once the repository has been quiet for the debounce interval
//! the accumulated change set is handed to a freshly built pipeline, which
//! updates the persisted genome.

mod debounce;
mod events;
pub mod filtering; // Public for discovery and tests
pub mod handlers;
pub mod types;

use crate::config::GenomeConfig;
use crate::error::Result;
use filtering::{to_relative_unix_style, IgnoreSet};
use notify::Watcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub use debounce::{Debouncer, FlushFn};
pub use events::{candidate_paths, process_event};
pub use handlers::PipelineFactory;
pub use types::{ChangeSet, WatcherPhase, WatcherState};

pub struct ChangeWatcher {
    root: PathBuf,
    ignore: IgnoreSet,
    debouncer: Debouncer,
    watcher: Option<notify::RecommendedWatcher>,
    event_task: Option<JoinHandle<()>>,
}

impl ChangeWatcher {
    /// Watcher that regenerates through `factory` on every flush
    pub fn new(root: &Path, config: &GenomeConfig, factory: Arc<PipelineFactory>) -> Result<Self> {
        Self::with_flush_handler(root, config, handlers::regeneration_callback(factory))
    }

    /// Watcher with a custom flush handler
    pub fn with_flush_handler(
        root: &Path,
        config: &GenomeConfig,
        on_flush: Arc<FlushFn>,
    ) -> Result<Self> {
        config.validate()?;
        let root = root.canonicalize()?;

        let mut ignore = IgnoreSet::new(config.ignore_patterns.iter().cloned());
        if let Some(output) = to_relative_unix_style(&config.output_path(&root), &root) {
            ignore = ignore.with_pattern(output);
        }

        Ok(Self {
            root,
            ignore,
            debouncer: Debouncer::new(config.debounce_interval(), on_flush),
            watcher: None,
            event_task: None,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn is_running(&self) -> bool {
        self.watcher.is_some()
    }

    /// Start watching. Must be called inside a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        if self.watcher.is_some() {
            warn!("Watcher already running for {}", self.root.display());
            return Ok(());
        }
        info!("👀 Starting change watcher for {}", self.root.display());

        let (tx, mut rx) = mpsc::unbounded_channel::<notify::Result<notify::Event>>();
        let mut watcher = notify::recommended_watcher(move |res| {
            if tx.send(res).is_err() {
                debug!("Event channel closed, dropping file event");
            }
        })
        .inspect_err(|e| error!("Failed to create file watcher: {}", e))?;
        watcher
            .watch(&self.root, notify::RecursiveMode::Recursive)
            .inspect_err(|e| error!("Failed to watch {}: {}", self.root.display(), e))?;
        self.watcher = Some(watcher);

        let root = self.root.clone();
        let ignore = self.ignore.clone();
        let debouncer = self.debouncer.clone();
        self.event_task = Some(tokio::spawn(async move {
            debug!("🔍 File system event task started");
            while let Some(event_result) = rx.recv().await {
                match event_result {
                    Ok(event) => {
                        process_event(&event, &root, &ignore, &debouncer);
                    }
                    Err(e) => warn!("File watcher error: {}", e),
                }
            }
            debug!("File system event task finished");
        }));

        info!(
            "Change watcher started (debounce {:.1}s)",
            self.debouncer.interval().as_secs_f64()
        );
        Ok(())
    }

    /// Feed an event directly, bypassing notify
    pub fn handle_event(&self, event: &notify::Event) -> usize {
        process_event(event, &self.root, &self.ignore, &self.debouncer)
    }

    /// Stop observing and discard pending changes. A regeneration already in
    /// progress runs to completion.
    pub fn stop(&mut self) {
        self.debouncer.stop();
        if let Some(watcher) = self.watcher.take() {
            drop(watcher);
            info!("Change watcher stopped");
        }
        if let Some(task) = self.event_task.take() {
            task.abort();
        }
    }
}

impl Drop for ChangeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
