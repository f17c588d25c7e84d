/// Progress reporting for long-running CLI operations
///
/// Updates go to stderr, leaving stdout clean for piped output. The reporter
/// is shared with engine workers, so all state sits behind a mutex.
use crate::engine::ProgressFn;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const REPORT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started { total_files: usize },
    Progress { processed: usize, total: usize },
    Completed { total: usize, duration_ms: u64 },
}

pub struct ProgressReporter {
    start_time: Instant,
    last_report: Mutex<Option<Instant>>,
    quiet: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            last_report: Mutex::new(None),
            quiet: false,
        }
    }

    /// Reporter that tracks events but prints nothing
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    /// Throttled to one line per 100ms; the first and last update always print.
    /// Returns the event when one was emitted.
    pub fn report(&self, processed: usize, total: usize) -> Option<ProgressEvent> {
        let now = Instant::now();
        {
            let mut last = self
                .last_report
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let due = match *last {
                None => true,
                Some(at) => now.duration_since(at) >= REPORT_INTERVAL || processed >= total,
            };
            if !due {
                return None;
            }
            *last = Some(now);
        }

        if processed <= 1 && !self.quiet {
            eprintln!("🚀 Starting extraction: {} files", total);
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            processed as f64 / elapsed
        } else {
            0.0
        };
        let pct = if total > 0 {
            (processed as f64 / total as f64 * 100.0) as u32
        } else {
            0
        };
        if !self.quiet {
            eprintln!(
                "⚡ Progress: {}/{} ({}%) - {:.0} files/sec",
                processed, total, pct, rate
            );
        }
        Some(ProgressEvent::Progress { processed, total })
    }

    pub fn complete(&self, total: usize) -> ProgressEvent {
        let elapsed = self.start_time.elapsed();
        if !self.quiet {
            let secs = elapsed.as_secs_f64();
            let rate = if secs > 0.0 { total as f64 / secs } else { 0.0 };
            eprintln!(
                "✅ Extraction complete: {} files in {:.2}s ({:.0} files/sec)",
                total, secs, rate
            );
        }
        ProgressEvent::Completed {
            total,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    /// Adapter for the engine's `(completed, total)` callback
    pub fn callback(self: &Arc<Self>) -> Arc<ProgressFn> {
        let reporter = Arc::clone(self);
        Arc::new(move |processed: usize, total: usize| {
            reporter.report(processed, total);
        })
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
