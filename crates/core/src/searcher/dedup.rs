//! Deduplication of accepted listings across queries.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{debug, warn};

use crate::metrics;

use super::Rankable;

static MAGNET_HASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[?&]xt=urn:btih:([0-9a-z]+)").unwrap());

/// Remove unusable and duplicate listings, then sort by seeds (descending).
///
/// Listings without seeds are dropped, as are listings without a URI. The
/// first listing seen for a [`dedup_key`] wins, whatever the seed counts of
/// later duplicates. The final sort is stable.
pub fn cleanup<T: Rankable>(listings: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(listings.len());

    for listing in listings {
        if listing.seeds() == 0 {
            continue;
        }

        let Some(uri) = listing.uri().filter(|u| !u.is_empty()) else {
            if let Some(name) = listing.name().filter(|n| !n.is_empty()) {
                warn!(
                    provider = listing.provider().unwrap_or_default(),
                    name = %name,
                    "No URI for listing"
                );
                metrics::LISTINGS_WITHOUT_URI.inc();
            }
            continue;
        };

        let key = dedup_key(listing.info_hash(), uri);
        debug!(
            provider = listing.provider().unwrap_or_default(),
            name = listing.name().unwrap_or_default(),
            hash = %key,
            "Computed dedup key"
        );

        if seen.insert(key) {
            kept.push(listing);
        } else {
            metrics::DUPLICATES_DROPPED.inc();
        }
    }

    kept.sort_by(|a, b| b.seeds().cmp(&a.seeds()));
    kept
}

/// Identity of a listing, uppercase.
///
/// The listing's own info-hash if it has one, else the hash embedded in a
/// magnet URI, else the MD5 of the URI.
pub fn dedup_key(info_hash: Option<&str>, uri: &str) -> String {
    if let Some(hash) = info_hash.map(str::trim).filter(|h| !h.is_empty()) {
        return hash.to_uppercase();
    }

    if uri.starts_with("magnet") {
        if let Some(hash) = magnet_info_hash(uri) {
            return hash.to_uppercase();
        }
    }

    format!("{:X}", md5::compute(uri.as_bytes()))
}

/// Extract the `xt=urn:btih:` hash from a magnet URI.
pub fn magnet_info_hash(uri: &str) -> Option<String> {
    MAGNET_HASH_RE
        .captures(uri)
        .map(|caps| caps[1].to_string())
}
