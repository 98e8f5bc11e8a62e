use crate::metrics::RunMetrics;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// A finite stream of url tokens shared by every worker. Each token is
/// handed to exactly one caller of [`WorkSource::next`].
#[derive(Clone)]
pub struct WorkSource {
    tokens: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl WorkSource {
    /// Starts a producer task that emits `requests` copies of `url` and then
    /// closes the source. `capacity` bounds how far production runs ahead.
    pub fn spawn(url: String, requests: usize, capacity: usize, metrics: Arc<RunMetrics>) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        tokio::spawn(async move {
            for _ in 0..requests {
                if tx.send(url.clone()).await.is_err() {
                    log::warn!("All workers gone, stopping token production early");
                    break;
                }
                metrics.increment_tokens_dispatched();
            }
            log::debug!("Work source exhausted after {} tokens", requests);
        });

        Self {
            tokens: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next token, or `None` once the source is closed and drained.
    pub async fn next(&self) -> Option<String> {
        let mut tokens = self.tokens.lock().await;
        tokens.recv().await
    }
}
