//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Searches (outcomes, attempts spent, duration)
//! - Catalog fetch failures by kind
//! - Candidate rejections by reason

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("randomsong_searches_total", "Total random searches"),
        &["outcome"], // "accepted", "exhausted", "unreachable"
    )
    .unwrap()
});

/// Attempts spent per search.
pub static SEARCH_ATTEMPTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "randomsong_search_attempts",
            "Fetch-and-evaluate cycles spent per search",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0, 20.0, 50.0, 100.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Search duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "randomsong_search_duration_seconds",
            "Duration of random searches",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Candidate fetches that failed, by kind.
pub static FETCH_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "randomsong_fetch_failures_total",
            "Candidate fetches that failed",
        ),
        &["kind"], // "not_found", "timeout", "rate_limited", "error"
    )
    .unwrap()
});

// =============================================================================
// Filter Metrics
// =============================================================================

/// Candidates rejected by the filter, by reason.
pub static CANDIDATES_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "randomsong_candidates_rejected_total",
            "Fetched candidates rejected by the filter",
        ),
        &["reason"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_ATTEMPTS.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(FETCH_FAILURES.clone()),
        Box::new(CANDIDATES_REJECTED.clone()),
    ]
}
