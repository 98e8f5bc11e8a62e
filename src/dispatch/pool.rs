use crate::dispatch::source::WorkSource;
use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::metrics::RunMetrics;
use crate::outcome::RequestOutcome;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A fixed set of workers, each pulling tokens until the source runs dry.
pub struct WorkerPool {
    handles: Vec<JoinHandle<usize>>,
}

impl WorkerPool {
    /// Spawns exactly `clients` workers. The pool takes ownership of
    /// `results` so the sink closes once the last worker exits.
    pub fn spawn(
        clients: usize,
        source: WorkSource,
        executor: Arc<dyn RequestExecutor>,
        results: mpsc::Sender<RequestOutcome>,
        metrics: Arc<RunMetrics>,
    ) -> Self {
        let handles = (0..clients)
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    source.clone(),
                    executor.clone(),
                    results.clone(),
                    metrics.clone(),
                ))
            })
            .collect();

        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker and returns how many requests they made in total.
    pub async fn join(self) -> Result<usize> {
        let mut handled = 0;
        for joined in join_all(self.handles).await {
            handled += joined.map_err(|e| Error::Internal(format!("Worker task failed: {}", e)))?;
        }
        Ok(handled)
    }
}

/// Counts a request as in flight until dropped, including on unwind.
struct InFlight<'a>(&'a RunMetrics);

impl<'a> InFlight<'a> {
    fn enter(metrics: &'a RunMetrics) -> Self {
        metrics.increment_active_workers();
        Self(metrics)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.decrement_active_workers();
    }
}

async fn worker(
    id: usize,
    source: WorkSource,
    executor: Arc<dyn RequestExecutor>,
    results: mpsc::Sender<RequestOutcome>,
    metrics: Arc<RunMetrics>,
) -> usize {
    let mut handled = 0;

    while let Some(url) = source.next().await {
        let outcome = {
            let _in_flight = InFlight::enter(&metrics);
            executor.execute(url).await
        };

        if results.send(outcome).await.is_err() {
            log::warn!("Worker {}: result sink closed, exiting", id);
            break;
        }
        handled += 1;
    }

    log::debug!("Worker {} finished after {} requests", id, handled);
    handled
}
