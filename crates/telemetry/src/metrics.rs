//! In-process metrics: named counters and latency summaries.

use crate::session_id;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Samples kept per latency for percentiles; older ones are dropped.
const MAX_SAMPLES: usize = 1024;

/// The process-wide registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Counters and latencies keyed by dotted names such as `detection.ip`
pub struct MetricsRegistry {
    counters: Mutex<BTreeMap<String, u64>>,
    latencies: Mutex<BTreeMap<String, Latency>>,
    started: Instant,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(BTreeMap::new()),
            latencies: Mutex::new(BTreeMap::new()),
            started: Instant::now(),
        }
    }

    /// Add one to `name`
    pub fn increment(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Current value of `name`, zero if never incremented
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(name).copied().unwrap_or(0)
    }

    /// Record one observation of `name`
    pub fn record_latency(&self, name: &str, elapsed: Duration) {
        let mut latencies = self.latencies.lock().unwrap_or_else(PoisonError::into_inner);
        latencies
            .entry(name.to_string())
            .or_default()
            .record(elapsed.as_secs_f64() * 1000.0);
    }

    /// Summary of `name`, if anything was recorded
    pub fn latency(&self, name: &str) -> Option<LatencySummary> {
        let latencies = self.latencies.lock().unwrap_or_else(PoisonError::into_inner);
        latencies.get(name).map(Latency::summary)
    }

    /// Everything recorded so far, with the session id and uptime
    pub fn export_json(&self) -> serde_json::Value {
        let counters = self
            .counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let latencies: BTreeMap<String, LatencySummary> = self
            .latencies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, latency)| (name.clone(), latency.summary()))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "uptime_ms": self.started.elapsed().as_millis() as u64,
            "counters": counters,
            "latencies": latencies,
        })
    }
}

#[derive(Default)]
struct Latency {
    count: u64,
    sum_ms: f64,
    min_ms: f64,
    max_ms: f64,
    samples: VecDeque<f64>,
}

impl Latency {
    fn record(&mut self, ms: f64) {
        if self.count == 0 {
            self.min_ms = ms;
            self.max_ms = ms;
        } else {
            self.min_ms = self.min_ms.min(ms);
            self.max_ms = self.max_ms.max(ms);
        }
        self.count += 1;
        self.sum_ms += ms;

        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(ms);
    }

    fn summary(&self) -> LatencySummary {
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);

        LatencySummary {
            count: self.count,
            min_ms: self.min_ms,
            max_ms: self.max_ms,
            mean_ms: if self.count == 0 { 0.0 } else { self.sum_ms / self.count as f64 },
            p50_ms: nearest_rank(&sorted, 50.0),
            p95_ms: nearest_rank(&sorted, 95.0),
        }
    }
}

/// Nearest-rank percentile of an ascending slice
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Latency statistics in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    pub count: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
}

/// Records its lifetime into the global registry under `name`.
///
/// Dropping without [`stop`](Self::stop) still records, so early returns
/// (a failed lookup) are measured too.
pub struct Timer {
    name: String,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start timing
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Record now and return the elapsed time
    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        metrics().record_latency(&self.name, elapsed);
        self.recorded = true;
        elapsed
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.recorded {
            self.record();
        }
    }
}
