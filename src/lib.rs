pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod outcome;
pub mod report;
pub mod stats;

pub use config::{ConfigLoader, LoadTestOptions};
pub use engine::{LoadTestEngine, RunState};
pub use error::{Error, Result};
pub use executor::{HttpExecutor, RequestExecutor};
pub use metrics::{MetricsSnapshot, RunMetrics};
pub use outcome::RequestOutcome;
pub use report::ConsoleReport;
pub use stats::{StatisticsTable, Summary};
