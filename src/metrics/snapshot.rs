use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub tokens_dispatched: u64,
    pub outcomes_collected: u64,
    pub successes: u64,
    pub failures: u64,
    pub active_workers: u64,
    pub requests_per_second: f64,
    pub elapsed_seconds: f64,
}
