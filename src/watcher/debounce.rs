//! Debounced flushing of accumulated changes
//!
//! The first accepted change arms a single timer task. Later changes only add
//! to the pending set and push the quiescence timestamp forward. When the timer
//! wakes it flushes if nothing arrived for a full interval, otherwise it sleeps
//! for the remaining quiet time and checks again. At most one timer exists.
//!
//! Flush callbacks are serialized and run on the blocking pool. Errors and
//! panics from a callback are logged and the debouncer keeps going.

use super::types::{ChangeSet, WatcherPhase, WatcherState};
use crate::error::GenomeError;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Mutex as TokioMutex;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Invoked once per flush with the deduplicated change set
pub type FlushFn = dyn Fn(ChangeSet) -> Result<(), GenomeError> + Send + Sync;

#[derive(Clone)]
pub struct Debouncer {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<WatcherState>,
    interval: Duration,
    on_flush: Arc<FlushFn>,
    flush_lock: TokioMutex<()>,
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("interval", &self.inner.interval)
            .field("phase", &self.phase())
            .finish()
    }
}

impl Debouncer {
    pub fn new(interval: Duration, on_flush: Arc<FlushFn>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(WatcherState::default()),
                interval,
                on_flush,
                flush_lock: TokioMutex::new(()),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    fn state(&self) -> MutexGuard<'_, WatcherState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record an accepted change. Must be called inside a tokio runtime.
    pub fn record(&self, relative: String) {
        let arm_timer = {
            let mut state = self.state();
            if state.stopped {
                return;
            }
            state.pending.insert(relative);
            state.last_event = Some(Instant::now());
            if state.timer_armed {
                false
            } else {
                state.timer_armed = true;
                true
            }
        };

        if arm_timer {
            debug!("⏱️  Debounce timer armed ({:?})", self.inner.interval);
            tokio::spawn(self.clone().run_timer());
        }
    }

    async fn run_timer(self) {
        let interval = self.inner.interval;
        let mut wait = interval;
        loop {
            tokio::time::sleep(wait).await;
            let batch = {
                let mut state = self.state();
                if state.stopped {
                    state.timer_armed = false;
                    return;
                }
                let quiet = state
                    .last_event
                    .map(|at| at.elapsed())
                    .unwrap_or(interval);
                if quiet < interval {
                    wait = interval - quiet;
                    continue;
                }
                state.timer_armed = false;
                state.last_event = None;
                state.flushes += 1;
                std::mem::take(&mut state.pending)
            };
            if !batch.is_empty() {
                self.flush(batch).await;
            }
            return;
        }
    }

    async fn flush(&self, batch: ChangeSet) {
        let _serialized = self.inner.flush_lock.lock().await;
        if self.state().stopped {
            debug!("Watcher stopped, discarding {} pending change(s)", batch.len());
            return;
        }

        info!("🔄 Regenerating genome for {} changed file(s)", batch.len());
        let callback = Arc::clone(&self.inner.on_flush);
        match tokio::task::spawn_blocking(move || callback(batch)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("❌ {}", e),
            Err(e) => error!("❌ Regeneration panicked: {}", e),
        }
    }

    /// Stop accepting changes and drop anything pending. Sleeping timers wake
    /// up, see the flag and exit without flushing.
    pub fn stop(&self) {
        let mut state = self.state();
        state.stopped = true;
        state.pending.clear();
        state.last_event = None;
    }

    pub fn phase(&self) -> WatcherPhase {
        self.state().phase()
    }

    pub fn pending(&self) -> ChangeSet {
        self.state().pending.clone()
    }

    /// Timestamp of the most recent accepted change, if any is pending
    pub fn last_event(&self) -> Option<Instant> {
        self.state().last_event
    }

    pub fn flush_count(&self) -> u64 {
        self.state().flushes
    }
}
