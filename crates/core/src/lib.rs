//! Torrent listing filter engine.
//!
//! Expands per-source query templates, verifies scraped listings against
//! the user's keyword and size policy, and deduplicates and ranks what is
//! left. Network access stays outside this crate, behind
//! [`searcher::ListingFetcher`].

pub mod config;
pub mod filtering;
pub mod metrics;
pub mod searcher;
pub mod template;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_definitions, load_definitions_from_str,
    validate_config, validate_definitions, Config, ConfigError,
};
pub use filtering::{FilterConfig, FilterSession, Verdict, VerifyOptions};
pub use searcher::{
    apply_filters, cleanup, FetchError, FilteredListing, ListingFetcher, RawListing, SearchRequest,
};
pub use template::{MediaCategory, MediaInfo, SourceDefinition};
