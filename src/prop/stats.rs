use crate::prop::result::Method;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-tier query counters owned by a resolver instance.
///
/// Increments are atomic, so a shared resolver can be queried from several
/// threads. A snapshot taken while queries are in flight may be off by the
/// in-flight queries.
#[derive(Debug, Default)]
pub struct Statistics {
    exact_match: AtomicU64,
    scaled_match: AtomicU64,
    simple_fallback: AtomicU64,
    total: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsCounts {
    pub exact_match: u64,
    pub scaled_match: u64,
    pub simple_fallback: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub exact_match_pct: f64,
    pub scaled_match_pct: f64,
    pub simple_fallback_pct: f64,
    pub total_queries: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, method: Method) {
        let counter = match method {
            Method::ExactMatch => &self.exact_match,
            Method::ScaledMatch => &self.scaled_match,
            Method::SimpleFallback => &self.simple_fallback,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn counts(&self) -> StatisticsCounts {
        StatisticsCounts {
            exact_match: self.exact_match.load(Ordering::Relaxed),
            scaled_match: self.scaled_match.load(Ordering::Relaxed),
            simple_fallback: self.simple_fallback.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
        }
    }

    /// Percentages are all zero before the first query.
    pub fn report(&self) -> StatisticsReport {
        let counts = self.counts();
        if counts.total == 0 {
            return StatisticsReport::default();
        }
        let pct = |n: u64| 100.0 * n as f64 / counts.total as f64;
        StatisticsReport {
            exact_match_pct: pct(counts.exact_match),
            scaled_match_pct: pct(counts.scaled_match),
            simple_fallback_pct: pct(counts.simple_fallback),
            total_queries: counts.total,
        }
    }

    pub fn reset(&self) {
        self.exact_match.store(0, Ordering::Relaxed);
        self.scaled_match.store(0, Ordering::Relaxed);
        self.simple_fallback.store(0, Ordering::Relaxed);
        self.total.store(0, Ordering::Relaxed);
    }
}
