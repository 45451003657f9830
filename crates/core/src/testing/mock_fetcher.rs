//! Mock listing fetcher for testing.

use std::collections::HashMap;

use crate::searcher::{FetchError, ListingFetcher, RawListing, SearchRequest};

/// Mock implementation of the [`ListingFetcher`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable listings, per query or as a default
/// - Record every request for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use sieve_core::testing::{fixtures, MockFetcher};
///
/// let mut fetcher = MockFetcher::new();
/// fetcher.set_listings("Firefly s01e03", vec![
///     fixtures::listing("Firefly.S01E03.720p.HDTV", "abc123", "1 GB", 10),
/// ]);
///
/// let results = session.run(&mut fetcher, VerifyOptions::default());
/// assert_eq!(fetcher.requests()[0].query, "Firefly s01e03");
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    /// Listings returned for a specific query.
    by_query: HashMap<String, Vec<RawListing>>,
    /// Listings returned for any other query.
    default: Vec<RawListing>,
    /// Recorded requests.
    requests: Vec<SearchRequest>,
    /// If set, the next fetch will fail with this error.
    next_error: Option<FetchError>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock fetcher returning `listings` for every query.
    pub fn with_listings(listings: Vec<RawListing>) -> Self {
        Self {
            default: listings,
            ..Self::default()
        }
    }

    /// Return `listings` when the expanded query equals `query`.
    pub fn set_listings(&mut self, query: impl Into<String>, listings: Vec<RawListing>) {
        self.by_query.insert(query.into(), listings);
    }

    /// Make the next fetch fail.
    pub fn fail_next(&mut self, error: FetchError) {
        self.next_error = Some(error);
    }

    pub fn requests(&self) -> &[SearchRequest] {
        &self.requests
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }
}

impl ListingFetcher for MockFetcher {
    fn fetch(&mut self, request: &SearchRequest) -> Result<Vec<RawListing>, FetchError> {
        self.requests.push(request.clone());

        if let Some(error) = self.next_error.take() {
            return Err(error);
        }

        Ok(self
            .by_query
            .get(&request.query)
            .unwrap_or(&self.default)
            .clone())
    }
}
