//! Basic metrics instrumentation.
//!
//! Counters for backend HTTP traffic, inventory cache effectiveness and the
//! share of form fields that were rejected by the formatter.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector shared by the client and the tools.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    http_requests_total: AtomicU64,
    http_errors_total: AtomicU64,
    http_duration_total_ms: AtomicU64,
    rows_fetched_total: AtomicU64,
    rows_written_total: AtomicU64,
    cache_hits_total: AtomicU64,
    cache_misses_total: AtomicU64,
    fields_formatted_total: AtomicU64,
    fields_rejected_total: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.inner.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.inner
            .http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.inner.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record rows read from the backend.
    pub fn record_rows_fetched(&self, count: usize) {
        self.inner
            .rows_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record one insert, update or delete.
    pub fn record_row_written(&self) {
        self.inner.rows_written_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache lookup.
    pub fn record_cache_access(&self, cache: &str, hit: bool) {
        if hit {
            self.inner.cache_hits_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(cache = %cache, "Cache hit");
        } else {
            self.inner.cache_misses_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(cache = %cache, "Cache miss");
        }
    }

    /// Record one formatter call and whether its value was valid.
    pub fn record_field_formatted(&self, is_valid: bool) {
        self.inner
            .fields_formatted_total
            .fetch_add(1, Ordering::Relaxed);
        if !is_valid {
            self.inner
                .fields_rejected_total
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.inner.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.inner.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.inner.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms();
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn rows_fetched_total(&self) -> u64 {
        self.inner.rows_fetched_total.load(Ordering::Relaxed)
    }

    pub fn rows_written_total(&self) -> u64 {
        self.inner.rows_written_total.load(Ordering::Relaxed)
    }

    pub fn cache_hits_total(&self) -> u64 {
        self.inner.cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn cache_misses_total(&self) -> u64 {
        self.inner.cache_misses_total.load(Ordering::Relaxed)
    }

    pub fn fields_formatted_total(&self) -> u64 {
        self.inner.fields_formatted_total.load(Ordering::Relaxed)
    }

    pub fn fields_rejected_total(&self) -> u64 {
        self.inner.fields_rejected_total.load(Ordering::Relaxed)
    }

    /// Fraction of cache lookups that hit, 0.0 when there were none.
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits_total();
        let total = hits + self.cache_misses_total();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        let c = &self.inner;
        for counter in [
            &c.http_requests_total,
            &c.http_errors_total,
            &c.http_duration_total_ms,
            &c.rows_fetched_total,
            &c.rows_written_total,
            &c.cache_hits_total,
            &c.cache_misses_total,
            &c.fields_formatted_total,
            &c.fields_rejected_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            rows_fetched_total: self.rows_fetched_total(),
            rows_written_total: self.rows_written_total(),
            cache_hit_rate: self.cache_hit_rate(),
            fields_formatted_total: self.fields_formatted_total(),
            fields_rejected_total: self.fields_rejected_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub rows_fetched_total: u64,
    pub rows_written_total: u64,
    pub cache_hit_rate: f64,
    pub fields_formatted_total: u64,
    pub fields_rejected_total: u64,
}
