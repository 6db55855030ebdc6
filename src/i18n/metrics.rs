//! Counters for language switches and translation lookups.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by a `TranslationStore` and updated by the switch controller.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of `switch_to` / `initialize` requests
    switch_requests: AtomicUsize,

    /// Number of maps applied to the store (including fallback applies)
    switches_applied: AtomicUsize,

    /// Number of times the fallback language was applied in place of the request
    fallbacks: AtomicUsize,

    /// Number of failed translation resource loads
    load_failures: AtomicUsize,

    /// Number of fetch results dropped because a newer switch was requested
    stale_discarded: AtomicUsize,

    /// Number of lookups that returned the raw key
    key_misses: AtomicUsize,
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub switch_requests: usize,
    pub switches_applied: usize,
    pub fallbacks: usize,
    pub load_failures: usize,
    pub stale_discarded: usize,
    pub key_misses: usize,
    /// Share of applied switches that used the fallback language, in percent
    pub fallback_rate: f64,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_switch_request(&self) {
        self.switch_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch_applied(&self) {
        self.switches_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_discarded(&self) {
        self.stale_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_miss(&self) {
        self.key_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn report(&self) -> MetricsReport {
        let applied = self.switches_applied.load(Ordering::Relaxed);
        let fallbacks = self.fallbacks.load(Ordering::Relaxed);
        let fallback_rate = if applied > 0 {
            (fallbacks as f64 / applied as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            switch_requests: self.switch_requests.load(Ordering::Relaxed),
            switches_applied: applied,
            fallbacks,
            load_failures: self.load_failures.load(Ordering::Relaxed),
            stale_discarded: self.stale_discarded.load(Ordering::Relaxed),
            key_misses: self.key_misses.load(Ordering::Relaxed),
            fallback_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_zeroed() {
        let report = TranslationMetrics::new().report();
        assert_eq!(report.switches_applied, 0);
        assert_eq!(report.key_misses, 0);
        assert_eq!(report.fallback_rate, 0.0);
    }

    #[test]
    fn test_fallback_rate() {
        let metrics = TranslationMetrics::new();
        for _ in 0..4 {
            metrics.record_switch_applied();
        }
        metrics.record_fallback();

        let report = metrics.report();
        assert_eq!(report.switches_applied, 4);
        assert_eq!(report.fallbacks, 1);
        assert!((report.fallback_rate - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_key_miss();
        metrics.record_stale_discarded();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["key_misses"], 1);
        assert_eq!(json["stale_discarded"], 1);
    }
}
