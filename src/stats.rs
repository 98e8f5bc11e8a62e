use crate::outcome::RequestOutcome;
use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate numbers for one url. Latencies cover successful requests only
/// and stay zero when there were none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub successes: u64,
    pub failures: u64,
    pub min_latency: Duration,
    pub mean_latency: Duration,
    pub max_latency: Duration,
}

impl Summary {
    pub fn total(&self) -> u64 {
        self.successes + self.failures
    }
}

pub type StatisticsTable = BTreeMap<String, Summary>;

#[derive(Default)]
struct Accumulator {
    successes: u64,
    failures: u64,
    min: Option<Duration>,
    max: Option<Duration>,
    sum: Duration,
}

impl Accumulator {
    fn add(&mut self, outcome: &RequestOutcome) {
        if !outcome.is_success() {
            self.failures += 1;
            return;
        }

        let elapsed = outcome.elapsed;
        self.successes += 1;
        self.sum += elapsed;
        self.min = Some(self.min.map_or(elapsed, |m| m.min(elapsed)));
        self.max = Some(self.max.map_or(elapsed, |m| m.max(elapsed)));
    }

    fn finish(self) -> Summary {
        let mean_latency = if self.successes > 0 {
            let nanos = self.sum.as_nanos() / u128::from(self.successes);
            Duration::from_nanos(nanos as u64)
        } else {
            Duration::ZERO
        };

        Summary {
            successes: self.successes,
            failures: self.failures,
            min_latency: self.min.unwrap_or_default(),
            mean_latency,
            max_latency: self.max.unwrap_or_default(),
        }
    }
}

/// Groups outcomes by url and summarizes each group in a single pass.
/// Arrival order does not affect the result.
pub fn reduce(outcomes: &[RequestOutcome]) -> StatisticsTable {
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();

    for outcome in outcomes {
        if let Some(acc) = groups.get_mut(&outcome.url) {
            acc.add(outcome);
        } else {
            let mut acc = Accumulator::default();
            acc.add(outcome);
            groups.insert(outcome.url.clone(), acc);
        }
    }

    groups
        .into_iter()
        .map(|(url, acc)| (url, acc.finish()))
        .collect()
}
