//! notify event translation
//!
//! Turns raw `notify::Event`s into accepted change-set entries. Filtering
//! happens before the debouncer sees anything, so ignored paths never touch
//! the pending set or the quiescence timestamp.

use super::debounce::Debouncer;
use super::filtering::{classify_path, FilterDecision, IgnoreSet};
use notify::{Event, EventKind};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Paths worth considering from one event. Access events never change content.
pub fn candidate_paths(event: &Event) -> &[PathBuf] {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any => {
            &event.paths
        }
        EventKind::Access(_) | EventKind::Other => &[],
    }
}

/// Feed one event into the debouncer; returns how many paths were accepted
pub fn process_event(event: &Event, root: &Path, ignore: &IgnoreSet, debouncer: &Debouncer) -> usize {
    let mut accepted = 0;
    for path in candidate_paths(event) {
        match classify_path(path, root, ignore) {
            FilterDecision::Accept(relative) => {
                debug!("📁 Change detected: {}", relative);
                debouncer.record(relative);
                accepted += 1;
            }
            decision => trace!("Discarding {}: {:?}", path.display(), decision),
        }
    }
    accepted
}
