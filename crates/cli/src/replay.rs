//! Recorded listings standing in for the network layer.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use sieve_core::{FetchError, RawListing, SearchRequest};

/// Listings recorded for a source, either one batch for every query or a
/// batch per expanded query.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Replay {
    Every(Vec<RawListing>),
    PerQuery(BTreeMap<String, Vec<RawListing>>),
}

impl Replay {
    /// Fetcher answering each request from the recording. Queries missing
    /// from a per-query recording get no listings.
    pub fn into_fetcher(
        self,
    ) -> impl FnMut(&SearchRequest) -> Result<Vec<RawListing>, FetchError> {
        move |request: &SearchRequest| {
            debug!(query = %request.query, url = %request.url, "Replaying listings");
            Ok(match &self {
                Replay::Every(listings) => listings.clone(),
                Replay::PerQuery(by_query) => {
                    by_query.get(&request.query).cloned().unwrap_or_default()
                }
            })
        }
    }
}
