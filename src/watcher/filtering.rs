//! Path filtering for watcher events and discovery
//!
//! Ignore patterns are plain substrings matched against the
//! repository-relative path. Paths that resolve outside the watched root
//! (through symlinks, for instance) are rejected.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        patterns.retain(|p| !p.is_empty());
        patterns.dedup();
        Self { patterns }
    }

    /// Add one more substring (the genome output file, usually)
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !pattern.is_empty() && !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        self
    }

    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.patterns.iter().any(|p| relative_path.contains(p.as_str()))
    }

    /// Directory check: the path is matched with a trailing `/`, so `dist/`
    /// prunes the `dist` directory itself
    pub fn is_ignored_dir(&self, relative_dir: &str) -> bool {
        self.is_ignored(&format!("{}/", relative_dir))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Why an event path was accepted or discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// Repository-relative, `/`-separated path
    Accept(String),
    Directory,
    Ignored,
    OutsideRoot,
}

/// Decide whether a changed path belongs in the change set.
///
/// `root` must already be canonical. Deleted files cannot be canonicalized, so
/// the nearest ancestor that still exists is resolved instead and the missing
/// tail is appended (`rm -rf pkg/` leaves neither `pkg/a.py` nor `pkg`).
pub fn classify_path(path: &Path, root: &Path, ignore: &IgnoreSet) -> FilterDecision {
    if path.is_dir() {
        return FilterDecision::Directory;
    }
    let Some(resolved) = resolve(path) else {
        return FilterDecision::OutsideRoot;
    };
    let Some(relative) = to_relative_unix_style(&resolved, root) else {
        return FilterDecision::OutsideRoot;
    };
    if ignore.is_ignored(&relative) {
        return FilterDecision::Ignored;
    }
    FilterDecision::Accept(relative)
}

fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    for ancestor in path.ancestors().skip(1) {
        if let Ok(canonical) = ancestor.canonicalize() {
            let tail = path.strip_prefix(ancestor).ok()?;
            return Some(canonical.join(tail));
        }
    }
    None
}

/// Relative path with `/` separators, or `None` when `path` is not under `root`
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
