use crate::config::LoadTestOptions;
use crate::dispatch::{collect, WorkSource, WorkerPool};
use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::metrics::{MetricsSnapshot, RunMetrics};
use crate::outcome::RequestOutcome;
use crate::report::ConsoleReport;
use crate::stats::{self, StatisticsTable};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Dispatching,
    Collecting,
    Reducing,
    Reporting,
    Done,
}

pub struct LoadTestEngine {
    options: LoadTestOptions,
    metrics: Arc<RunMetrics>,
    state: watch::Sender<RunState>,
}

impl LoadTestEngine {
    pub fn new(options: LoadTestOptions, metrics: Option<Arc<RunMetrics>>) -> Self {
        let (state_tx, _) = watch::channel(RunState::Idle);

        Self {
            options,
            metrics: metrics.unwrap_or_else(|| Arc::new(RunMetrics::new())),
            state: state_tx,
        }
    }

    pub fn options(&self) -> &LoadTestOptions {
        &self.options
    }

    /// Runs the whole pipeline: dispatch, collect, reduce, print.
    pub async fn execute(
        &self,
        executor: Arc<dyn RequestExecutor>,
        report: &ConsoleReport,
    ) -> Result<StatisticsTable> {
        let outcomes = self.dispatch(executor).await?;

        self.set_state(RunState::Reducing);
        let table = stats::reduce(&outcomes);

        self.set_state(RunState::Reporting);
        report.print(&table)?;

        self.set_state(RunState::Done);
        Ok(table)
    }

    /// Sends every request and returns the raw outcomes, in arrival order.
    pub async fn dispatch(&self, executor: Arc<dyn RequestExecutor>) -> Result<Vec<RequestOutcome>> {
        let LoadTestOptions {
            url,
            requests,
            clients,
        } = self.options.clone();

        if clients == 0 {
            return Err(Error::Config("clients must be at least 1".to_string()));
        }

        self.set_state(RunState::Dispatching);
        log::info!(
            "Dispatching {} requests to {} across {} clients",
            requests,
            url,
            clients
        );

        let source = WorkSource::spawn(url, requests, clients, self.metrics.clone());
        let (results_tx, results_rx) = mpsc::channel(clients);
        let pool = WorkerPool::spawn(
            clients,
            source,
            executor,
            results_tx,
            self.metrics.clone(),
        );
        log::debug!("Spawned {} workers", pool.size());

        self.set_state(RunState::Collecting);
        let collected = collect(results_rx, requests, &self.metrics).await;
        let handled = pool.join().await?;
        let outcomes = collected?;

        log::info!(
            "Collected {} outcomes ({} requests made) in {:.2}s",
            outcomes.len(),
            handled,
            self.metrics.snapshot().elapsed_seconds
        );
        Ok(outcomes)
    }

    pub fn get_metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn watch_metrics(&self) -> watch::Receiver<MetricsSnapshot> {
        let (tx, rx) = watch::channel(self.metrics.snapshot());
        let metrics = self.metrics.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(200));
            loop {
                interval.tick().await;
                if tx.send(metrics.snapshot()).is_err() {
                    break;
                }
            }
        });
        rx
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    pub fn set_state(&self, state: RunState) {
        log::debug!("Run state -> {:?}", state);
        self.state.send_replace(state);
    }
}
