pub mod collector;
pub mod snapshot;

pub use collector::RunMetrics;
pub use snapshot::MetricsSnapshot;
