use crate::error::{Error, Result};
use crate::metrics::RunMetrics;
use crate::outcome::RequestOutcome;
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Blocks until exactly `requests` outcomes have arrived on `results`.
///
/// The sink closing early means a worker died mid-run; that is reported as an
/// error rather than a short list.
pub async fn collect(
    results: mpsc::Receiver<RequestOutcome>,
    requests: usize,
    metrics: &RunMetrics,
) -> Result<Vec<RequestOutcome>> {
    let outcomes: Vec<RequestOutcome> = ReceiverStream::new(results)
        .take(requests)
        .inspect(|outcome| metrics.record_collected(outcome))
        .collect()
        .await;

    if outcomes.len() != requests {
        log::error!(
            "Result sink closed after {} of {} outcomes",
            outcomes.len(),
            requests
        );
        return Err(Error::Internal(format!(
            "expected {} outcomes, received {}",
            requests,
            outcomes.len()
        )));
    }

    Ok(outcomes)
}
