//! Work distribution: a token source, the worker pool that drains it, and
//! the collector that gathers what the workers produce.

pub mod collector;
pub mod pool;
pub mod source;

pub use collector::collect;
pub use pool::WorkerPool;
pub use source::WorkSource;
