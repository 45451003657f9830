//! Testing utilities: a mock fetcher and fixtures.
//!
//! Lets sessions run end to end without a network layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use sieve_core::testing::{fixtures, MockFetcher};
//!
//! let mut session = fixtures::session();
//! session.use_category(MediaCategory::Episode, &fixtures::firefly(), &SizeSettings::default());
//!
//! let mut fetcher = MockFetcher::with_listings(vec![
//!     fixtures::listing("Firefly.S01E03.720p.HDTV", "abc123", "1.1 GB", 10),
//! ]);
//! let results = session.run(&mut fetcher, VerifyOptions::default());
//! ```

mod mock_fetcher;

pub use mock_fetcher::MockFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{FilterSettings, SizeBounds};
    use crate::filtering::{FilterConfig, FilterSession};
    use crate::searcher::{RawListing, RawValue};
    use crate::template::{CategoryTemplate, MediaInfo, SourceDefinition};

    /// Create a raw listing with a magnet URI built from `info_hash`.
    pub fn listing(name: &str, info_hash: &str, size: &str, seeds: u32) -> RawListing {
        RawListing {
            name: Some(name.to_string()),
            info_hash: Some(info_hash.to_string()),
            uri: Some(format!("magnet:?xt=urn:btih:{}", info_hash)),
            size: Some(RawValue::from(size)),
            seeds: Some(RawValue::from(seeds)),
            peers: Some(RawValue::from(seeds / 2)),
        }
    }

    /// Create a raw listing that only has a download URL.
    pub fn url_listing(name: &str, uri: &str, size: &str, seeds: u32) -> RawListing {
        RawListing {
            name: Some(name.to_string()),
            info_hash: None,
            uri: Some(uri.to_string()),
            size: Some(RawValue::from(size)),
            seeds: Some(RawValue::from(seeds)),
            peers: None,
        }
    }

    /// A source with movie, episode and season templates.
    pub fn definition() -> SourceDefinition {
        SourceDefinition {
            name: "Mock Tracker".to_string(),
            color: "FFF14E13".to_string(),
            language: "en".to_string(),
            base_url: "https://tracker.example".to_string(),
            separator: "+".to_string(),
            general: CategoryTemplate {
                query: Some("/search?q=QUERY".to_string()),
                keywords: Some("{title}".to_string()),
                ..CategoryTemplate::default()
            },
            movie: CategoryTemplate {
                query: Some("/search?cat=movies&q=QUERYEXTRA".to_string()),
                keywords: Some("{title} {year}".to_string()),
                extra: Some("&sort=seeds".to_string()),
                ..CategoryTemplate::default()
            },
            episode: CategoryTemplate {
                query: Some("/search?cat=tv&q=QUERY".to_string()),
                keywords: Some("{title} s{season:2}e{episode:2}".to_string()),
                extra: None,
                keywords2: Some("{title} {season}x{episode:2}".to_string()),
                extra2: None,
            },
            season: CategoryTemplate {
                query: Some("/search?cat=tv&q=QUERY".to_string()),
                keywords: Some("{title} season {season}".to_string()),
                ..CategoryTemplate::default()
            },
            anime: CategoryTemplate {
                query: Some("/search?cat=anime&q=QUERY".to_string()),
                keywords: Some("{title} {episode:2}".to_string()),
                ..CategoryTemplate::default()
            },
            ..SourceDefinition::default()
        }
    }

    /// Firefly, season 1 episode 3.
    pub fn firefly() -> MediaInfo {
        MediaInfo {
            title: "Firefly".to_string(),
            year: 2002,
            season: 1,
            episode: 3,
            ..MediaInfo::default()
        }
    }

    /// A session over [`definition`] with default settings and title
    /// filtering on.
    pub fn session() -> FilterSession {
        let filters = FilterConfig::from_settings(&FilterSettings::default(), SizeBounds::default());
        FilterSession::new("mock", definition(), filters, "icons").with_filter_title(true)
    }
}
