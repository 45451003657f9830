//! Search plumbing around the network boundary.
//!
//! Builds concrete search requests from expanded queries, defines the
//! [`ListingFetcher`] seam the network layer implements, and runs the final
//! dedup and ranking pass over accepted listings.

mod dedup;
mod rank;
mod request;
mod types;

pub use dedup::{cleanup, dedup_key, magnet_info_hash};
pub use rank::{apply_filters, check_quality, sort_by_quality, QualityTier, RankedListing};
pub use types::*;
