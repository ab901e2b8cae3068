//! Metrics hooks for membership filter operations
//!
//! Counters are plain atomics; nothing is exported from here. Wire a
//! custom [`MetricsRecorder`] to forward them to an external system.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use bloom_membership::{FilterConfig, Metrics, MembershipFilter};
//!
//! let metrics = Arc::new(Metrics::new());
//! let filter =
//!     MembershipFilter::with_metrics(FilterConfig::default(), metrics.clone()).unwrap();
//! filter.insert("alpha");
//! assert!(filter.query("alpha"));
//! assert_eq!(metrics.snapshot().inserts, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Metrics collector for filter operations
#[derive(Default, Debug)]
pub struct Metrics {
    /// Filters created with this collector
    pub filters_created: AtomicU64,
    /// Total insert calls
    pub inserts: AtomicU64,
    /// Total query calls
    pub queries: AtomicU64,
    /// Queries answered "probably present"
    pub queries_positive: AtomicU64,
    /// Total dump calls
    pub dumps: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
    /// Cumulative query time in nanoseconds
    pub query_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_created(&self, _size_bits: usize, _hash_count: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_insert(&self, duration: Duration) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a query; `found` may be a false positive
    pub fn record_query(&self, duration: Duration, found: bool) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.query_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.queries_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_dump(&self) {
        self.dumps.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            queries_positive: self.queries_positive.load(Ordering::Relaxed),
            dumps: self.dumps.load(Ordering::Relaxed),
            avg_insert_ns: average(&self.insert_time_ns, &self.inserts),
            avg_query_ns: average(&self.query_time_ns, &self.queries),
        }
    }

    /// Ratio of positive queries to all queries
    ///
    /// Includes true positives, so this is an upper bound on the observed
    /// false positive rate.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.queries.load(Ordering::Relaxed);
        let positive = self.queries_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }
}

fn average(total: &AtomicU64, count: &AtomicU64) -> u64 {
    let count = count.load(Ordering::Relaxed);
    if count > 0 {
        total.load(Ordering::Relaxed) / count
    } else {
        0
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub inserts: u64,
    pub queries: u64,
    pub queries_positive: u64,
    pub dumps: u64,
    pub avg_insert_ns: u64,
    pub avg_query_ns: u64,
}

/// Trait for custom metrics recording implementations
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, size_bits: usize, hash_count: usize);

    fn record_insert(&self, duration: Duration);

    fn record_query(&self, duration: Duration, found: bool);

    fn record_dump(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default, Debug)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize) {}
    fn record_insert(&self, _: Duration) {}
    fn record_query(&self, _: Duration, _: bool) {}
    fn record_dump(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, size_bits: usize, hash_count: usize) {
        Metrics::record_filter_created(self, size_bits, hash_count);
    }

    fn record_insert(&self, duration: Duration) {
        Metrics::record_insert(self, duration);
    }

    fn record_query(&self, duration: Duration, found: bool) {
        Metrics::record_query(self, duration, found);
    }

    fn record_dump(&self) {
        Metrics::record_dump(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());
    }

    #[test]
    fn test_record_queries() {
        let metrics = Metrics::new();

        metrics.record_query(Duration::from_nanos(100), true);
        metrics.record_query(Duration::from_nanos(150), false);
        metrics.record_query(Duration::from_nanos(120), true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries, 3);
        assert_eq!(snapshot.queries_positive, 2);
        assert_eq!(snapshot.avg_query_ns, 123); // (100 + 150 + 120) / 3
    }

    #[test]
    fn test_observed_positive_rate() {
        let metrics = Metrics::new();
        for _ in 0..90 {
            metrics.record_query(Duration::from_nanos(10), false);
        }
        for _ in 0..10 {
            metrics.record_query(Duration::from_nanos(10), true);
        }
        assert!((metrics.observed_positive_rate() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoOpMetrics;
        metrics.record_filter_created(264, 2);
        metrics.record_insert(Duration::from_nanos(100));
        metrics.record_query(Duration::from_nanos(100), true);
        metrics.record_dump();
    }
}
