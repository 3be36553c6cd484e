//! Search pass counters.
//!
//! Cheap atomic counters for queries, superseded passes, provider passes,
//! and delivered results. Each update also emits a tracing event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters shared by every clone of a tracker.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    queries_total: Arc<AtomicU64>,
    superseded_total: Arc<AtomicU64>,
    provider_passes_total: Arc<AtomicU64>,
    provider_failures_total: Arc<AtomicU64>,
    results_total: Arc<AtomicU64>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            queries_total: Arc::new(AtomicU64::new(0)),
            superseded_total: Arc::new(AtomicU64::new(0)),
            provider_passes_total: Arc::new(AtomicU64::new(0)),
            provider_failures_total: Arc::new(AtomicU64::new(0)),
            results_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a completed aggregation.
    pub fn track_query(&self, duration_ms: u128, result_count: usize) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
        self.results_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search query completed"
        );
    }

    /// Track a pass abandoned because a newer query arrived.
    pub fn track_superseded(&self) {
        self.superseded_total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Search pass superseded");
    }

    /// Track one provider's ranking pass.
    pub fn track_provider_pass(&self, provider: &str, duration_ms: u128, success: bool) {
        self.provider_passes_total.fetch_add(1, Ordering::Relaxed);

        if success {
            tracing::trace!(
                provider = %provider,
                duration_ms = duration_ms,
                "Provider pass completed"
            );
        } else {
            self.provider_failures_total.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                provider = %provider,
                duration_ms = duration_ms,
                "Provider pass failed"
            );
        }
    }

    pub fn queries_total(&self) -> u64 {
        self.queries_total.load(Ordering::Relaxed)
    }

    pub fn superseded_total(&self) -> u64 {
        self.superseded_total.load(Ordering::Relaxed)
    }

    pub fn provider_passes_total(&self) -> u64 {
        self.provider_passes_total.load(Ordering::Relaxed)
    }

    pub fn provider_failures_total(&self) -> u64 {
        self.provider_failures_total.load(Ordering::Relaxed)
    }

    pub fn results_total(&self) -> u64 {
        self.results_total.load(Ordering::Relaxed)
    }

    /// Share of started queries that were superseded (0.0 to 1.0).
    pub fn superseded_rate(&self) -> f64 {
        let superseded = self.superseded_total() as f64;
        let total = (self.queries_total() + self.superseded_total()) as f64;

        if total == 0.0 {
            0.0
        } else {
            superseded / total
        }
    }

    /// Human-readable summary of all counters.
    pub fn summary(&self) -> String {
        format!(
            "Search Metrics:\n\
             Queries: {}\n\
             Superseded: {} ({:.2}%)\n\
             Provider Passes: {}\n\
             Provider Failures: {}\n\
             Results Delivered: {}",
            self.queries_total(),
            self.superseded_total(),
            self.superseded_rate() * 100.0,
            self.provider_passes_total(),
            self.provider_failures_total(),
            self.results_total(),
        )
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Measures how long an operation took.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Elapsed milliseconds so far.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Stop the timer, returning the elapsed milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.elapsed_ms();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
