use crate::metrics::snapshot::MetricsSnapshot;
use crate::outcome::RequestOutcome;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Instant;

/// Live counters for a run in progress. Only used for progress display;
/// the final report is computed from the collected outcomes.
#[derive(Clone)]
pub struct RunMetrics {
    tokens_dispatched: Arc<AtomicU64>,
    outcomes_collected: Arc<AtomicU64>,
    successes: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
    active_workers: Arc<AtomicU64>,
    start_time: Arc<Instant>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            tokens_dispatched: Arc::new(AtomicU64::new(0)),
            outcomes_collected: Arc::new(AtomicU64::new(0)),
            successes: Arc::new(AtomicU64::new(0)),
            failures: Arc::new(AtomicU64::new(0)),
            active_workers: Arc::new(AtomicU64::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_tokens_dispatched(&self) {
        self.tokens_dispatched.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_active_workers(&self) {
        self.active_workers.fetch_add(1, Ordering::SeqCst);
    }

    pub fn decrement_active_workers(&self) {
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn record_collected(&self, outcome: &RequestOutcome) {
        self.outcomes_collected.fetch_add(1, Ordering::SeqCst);
        if outcome.is_success() {
            self.successes.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let collected = self.outcomes_collected.load(Ordering::SeqCst);
        let elapsed = self.start_time.elapsed().as_secs_f64();

        MetricsSnapshot {
            tokens_dispatched: self.tokens_dispatched.load(Ordering::SeqCst),
            outcomes_collected: collected,
            successes: self.successes.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::SeqCst),
            active_workers: self.active_workers.load(Ordering::SeqCst),
            requests_per_second: if elapsed > 0.0 {
                collected as f64 / elapsed
            } else {
                0.0
            },
            elapsed_seconds: elapsed,
        }
    }
}
