//! Translation metrics and observability.
//!
//! Counters are shared between the orchestrator and the download coordinator
//! through an `Arc<TranslationMetrics>`; each pipeline owns its own instance.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Translation requests received
    requests: AtomicUsize,

    /// Requests that returned a translation
    successes: AtomicUsize,

    /// Requests that ended in an error of any kind
    failures: AtomicUsize,

    /// Requests answered without the engine because source == target
    short_circuits: AtomicUsize,

    /// Calls made to the translation engine (first attempts and retries)
    engine_calls: AtomicUsize,

    /// Engine calls repeated after missing models were downloaded
    retries: AtomicUsize,

    /// Download episodes started with the model store
    downloads_started: AtomicUsize,

    /// Callers that joined a download already in flight
    deduplicated_waits: AtomicUsize,

    /// Download episodes that ended in failure
    download_failures: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_short_circuit(&self) {
        self.short_circuits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_engine_call(&self) {
        self.engine_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_download_started(&self) {
        self.downloads_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deduplicated_wait(&self) {
        self.deduplicated_waits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_download_failure(&self) {
        self.download_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn engine_calls(&self) -> usize {
        self.engine_calls.load(Ordering::Relaxed)
    }

    pub fn retries(&self) -> usize {
        self.retries.load(Ordering::Relaxed)
    }

    pub fn downloads_started(&self) -> usize {
        self.downloads_started.load(Ordering::Relaxed)
    }

    pub fn deduplicated_waits(&self) -> usize {
        self.deduplicated_waits.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let successes = self.successes.load(Ordering::Relaxed);
        let success_rate = if requests > 0 {
            (successes as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            successes,
            failures: self.failures.load(Ordering::Relaxed),
            success_rate,
            short_circuits: self.short_circuits.load(Ordering::Relaxed),
            engine_calls: self.engine_calls(),
            retries: self.retries(),
            downloads_started: self.downloads_started(),
            deduplicated_waits: self.deduplicated_waits(),
            download_failures: self.download_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub successes: usize,
    pub failures: usize,

    /// Successful requests as a percentage (0-100)
    pub success_rate: f64,

    pub short_circuits: usize,
    pub engine_calls: usize,
    pub retries: usize,
    pub downloads_started: usize,
    pub deduplicated_waits: usize,
    pub download_failures: usize,
}
