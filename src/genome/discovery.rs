//! Source file discovery
//!
//! Walks the repository with `walkdir`, pruning ignored directories early so
//! large dependency trees are never descended into.

use crate::config::GenomeConfig;
use crate::extractors::supported_extensions;
use crate::watcher::filtering::{to_relative_unix_style, IgnoreSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file selected for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Repository-relative, `/`-separated
    pub relative: String,
}

#[derive(Debug, Clone)]
pub struct Discovery {
    root: PathBuf,
    ignore: IgnoreSet,
    max_file_size: u64,
}

impl Discovery {
    pub fn new(root: impl Into<PathBuf>, ignore: IgnoreSet, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            ignore,
            max_file_size,
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &GenomeConfig) -> Self {
        Self::new(
            root,
            IgnoreSet::new(config.ignore_patterns.iter().cloned()),
            config.max_file_size,
        )
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// All analyzable files under the root, sorted by relative path
    pub fn discover(&self) -> Vec<DiscoveredFile> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                match to_relative_unix_style(entry.path(), &self.root) {
                    Some(relative) if entry.file_type().is_dir() => {
                        !self.ignore.is_ignored_dir(&relative)
                    }
                    Some(relative) => !self.ignore.is_ignored(&relative),
                    None => false,
                }
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry during discovery: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = to_relative_unix_style(entry.path(), &self.root) else {
                continue;
            };
            if self.accepts(entry.path()) {
                files.push(DiscoveredFile {
                    path: entry.path().to_path_buf(),
                    relative,
                });
            }
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        debug!("Discovered {} files under {}", files.len(), self.root.display());
        files
    }

    /// Size and language checks for a single existing file
    pub fn accepts(&self, path: &Path) -> bool {
        match path.metadata() {
            Ok(meta) if !meta.is_file() => return false,
            Ok(meta) if meta.len() > self.max_file_size => {
                debug!(
                    "Skipping {} ({} bytes exceeds limit)",
                    path.display(),
                    meta.len()
                );
                return false;
            }
            Ok(_) => {}
            Err(_) => return false,
        }
        is_analyzable(path)
    }
}

/// Known extension, or no extension and a `#!` first line
pub fn is_analyzable(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => supported_extensions().contains(&ext.to_ascii_lowercase().as_str()),
        None => has_shebang(path),
    }
}

fn has_shebang(path: &Path) -> bool {
    let mut head = [0u8; 2];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut head))
        .map(|_| &head == b"#!")
        .unwrap_or(false)
}
