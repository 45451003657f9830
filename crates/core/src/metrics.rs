//! Prometheus metrics for the filtering engine.
//!
//! This module provides metrics for:
//! - Query expansion (queries built per source)
//! - Verification (accepted and rejected listings, by reason)
//! - Dedup and ranking (duplicates dropped, listings without a URI)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Query Metrics
// =============================================================================

/// Queries expanded from templates, by source.
pub static QUERIES_EXPANDED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("sieve_queries_expanded_total", "Total search queries expanded"),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Verification Metrics
// =============================================================================

/// Listings verified, by source and outcome.
pub static LISTINGS_VERIFIED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("sieve_listings_verified_total", "Total listings verified"),
        &["source", "outcome"], // "accepted" or a rejection reason slug
    )
    .unwrap()
});

/// Accepted listings per finished session.
pub static SESSION_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "sieve_session_results",
            "Number of accepted listings per filter session",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Dedup Metrics
// =============================================================================

/// Listings dropped as duplicates.
pub static DUPLICATES_DROPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "sieve_duplicates_dropped_total",
        "Total listings dropped as duplicates",
    )
    .unwrap()
});

/// Named listings dropped for lacking a URI.
pub static LISTINGS_WITHOUT_URI: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "sieve_listings_without_uri_total",
        "Total named listings dropped for lacking a URI",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Queries
        Box::new(QUERIES_EXPANDED.clone()),
        // Verification
        Box::new(LISTINGS_VERIFIED.clone()),
        Box::new(SESSION_RESULTS.clone()),
        // Dedup
        Box::new(DUPLICATES_DROPPED.clone()),
        Box::new(LISTINGS_WITHOUT_URI.clone()),
    ]
}
