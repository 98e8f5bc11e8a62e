use async_trait::async_trait;
use lodestone::{
    ConsoleReport, LoadTestEngine, LoadTestOptions, RequestExecutor, RequestOutcome, RunMetrics,
    RunState,
};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn options(requests: usize, clients: usize) -> LoadTestOptions {
    LoadTestOptions {
        url: "http://stub/".to_string(),
        requests,
        clients,
    }
}

/// Returns pre-scripted (status, latency) pairs in call order.
struct ScriptedExecutor {
    script: Mutex<VecDeque<(u16, u64)>>,
}

impl ScriptedExecutor {
    fn new(script: &[(u16, u64)]) -> Self {
        Self {
            script: Mutex::new(script.iter().copied().collect()),
        }
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, url: String) -> RequestOutcome {
        let (status, millis) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("executor called more times than scripted");
        RequestOutcome::new(url, status, Duration::from_millis(millis))
    }
}

/// Sleeps a random few milliseconds, then returns an outcome with a unique
/// latency so every produced outcome can be told apart.
struct JitterExecutor {
    counter: AtomicU64,
    produced: Mutex<Vec<RequestOutcome>>,
}

impl JitterExecutor {
    fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
            produced: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RequestExecutor for JitterExecutor {
    async fn execute(&self, url: String) -> RequestOutcome {
        let delay = rand::thread_rng().gen_range(0..3);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let status = if n % 7 == 0 { 503 } else { 200 };
        let outcome = RequestOutcome::new(url, status, Duration::from_micros(n));
        self.produced.lock().unwrap().push(outcome.clone());
        outcome
    }
}

#[tokio::test]
async fn test_sequential_scripted_run() {
    let executor = Arc::new(ScriptedExecutor::new(&[(200, 50), (500, 10), (200, 150)]));
    let engine = LoadTestEngine::new(options(3, 1), None);

    let table = engine
        .execute(executor, &ConsoleReport::default())
        .await
        .unwrap();

    let summary = table["http://stub/"];
    assert_eq!(summary.successes, 2);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.min_latency, Duration::from_millis(50));
    assert_eq!(summary.mean_latency, Duration::from_millis(100));
    assert_eq!(summary.max_latency, Duration::from_millis(150));
    assert_eq!(engine.state(), RunState::Done);
}

#[tokio::test]
async fn test_zero_requests_is_an_empty_run() {
    let executor = Arc::new(ScriptedExecutor::new(&[]));
    let engine = LoadTestEngine::new(options(0, 4), None);

    let outcomes = engine.dispatch(executor.clone()).await.unwrap();
    assert!(outcomes.is_empty());

    let table = engine
        .execute(executor, &ConsoleReport::default())
        .await
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(ConsoleReport::render(&table), "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_count_conservation() {
    for (requests, clients) in [(1, 1), (5, 1), (7, 3), (3, 10), (64, 8)] {
        let executor = Arc::new(JitterExecutor::new());
        let engine = LoadTestEngine::new(options(requests, clients), None);

        let outcomes = engine.dispatch(executor.clone()).await.unwrap();
        assert_eq!(
            outcomes.len(),
            requests,
            "requests={} clients={}",
            requests,
            clients
        );
        assert_eq!(executor.counter.load(Ordering::SeqCst), requests as u64);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_outcome_lost_or_duplicated() {
    let executor = Arc::new(JitterExecutor::new());
    let metrics = Arc::new(RunMetrics::new());
    let engine = LoadTestEngine::new(options(1000, 10), Some(metrics.clone()));

    let mut collected = engine.dispatch(executor.clone()).await.unwrap();
    assert_eq!(collected.len(), 1000);

    let mut produced = executor.produced.lock().unwrap().clone();
    collected.sort_by_key(|o| o.elapsed);
    produced.sort_by_key(|o| o.elapsed);
    assert_eq!(collected, produced);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.tokens_dispatched, 1000);
    assert_eq!(snapshot.outcomes_collected, 1000);
    assert_eq!(snapshot.successes + snapshot.failures, 1000);
    assert_eq!(snapshot.active_workers, 0);

    let table = lodestone::stats::reduce(&collected);
    assert_eq!(table["http://stub/"].total(), 1000);
}

#[tokio::test]
async fn test_zero_clients_rejected() {
    let executor = Arc::new(ScriptedExecutor::new(&[]));
    let engine = LoadTestEngine::new(options(3, 0), None);

    let result = engine.dispatch(executor).await;
    assert!(matches!(result, Err(lodestone::Error::Config(_))));
    assert_eq!(engine.state(), RunState::Idle);
}

#[tokio::test]
async fn test_state_transitions_are_published() {
    let executor = Arc::new(ScriptedExecutor::new(&[(200, 1)]));
    let engine = LoadTestEngine::new(options(1, 1), None);
    let states = engine.subscribe_state();

    assert_eq!(*states.borrow(), RunState::Idle);
    engine
        .execute(executor, &ConsoleReport::default())
        .await
        .unwrap();
    assert_eq!(*states.borrow(), RunState::Done);
}
