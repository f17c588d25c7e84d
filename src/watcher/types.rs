//! Watcher state and change sets

use std::collections::BTreeSet;
use tokio::time::Instant;

/// Deduplicated repository-relative paths accumulated since the last flush
pub type ChangeSet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherPhase {
    /// Nothing pending, no timer
    Idle,
    /// Changes pending and the timer is armed
    Accumulating,
    Stopped,
}

/// Everything the debouncer mutates, guarded by one mutex
#[derive(Debug, Default)]
pub struct WatcherState {
    pub pending: ChangeSet,
    pub last_event: Option<Instant>,
    pub timer_armed: bool,
    pub stopped: bool,
    pub flushes: u64,
}

impl WatcherState {
    pub fn phase(&self) -> WatcherPhase {
        if self.stopped {
            WatcherPhase::Stopped
        } else if self.timer_armed {
            WatcherPhase::Accumulating
        } else {
            WatcherPhase::Idle
        }
    }
}
