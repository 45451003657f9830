//! One filtering session: a source, a media category, and the listings
//! accepted so far.
//!
//! The session hands out expanded queries in order, verifies the listings
//! each query returns, and accumulates the accepted ones. Query order
//! matters because verification compares names against the title set by
//! the most recent query.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, SizeSettings};
use crate::metrics;
use crate::searcher::{FilteredListing, ListingFetcher, RawListing, Rankable, SearchRequest};
use crate::template::{build_queries, expand, MediaCategory, MediaInfo, QueryTemplate, SourceDefinition};

use super::config::FilterConfig;
use super::verify::{verify, TitleSource, Verdict};

/// Which parts of a listing are checked during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// When off, the session title stands in for the listing name.
    pub verify_name: bool,
    /// When off, no size is checked.
    pub verify_size: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            verify_name: true,
            verify_size: true,
        }
    }
}

/// Filtering state for one source.
///
/// Not meant to be shared: every source queried gets its own session.
#[derive(Debug)]
pub struct FilterSession {
    source_id: String,
    definition: SourceDefinition,
    filters: FilterConfig,
    filter_title: bool,
    icons_dir: PathBuf,
    template: Option<QueryTemplate>,
    next_index: usize,
    title: String,
    results: Vec<FilteredListing>,
}

impl FilterSession {
    pub fn new(
        source_id: impl Into<String>,
        definition: SourceDefinition,
        filters: FilterConfig,
        icons_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            definition,
            filters,
            filter_title: false,
            icons_dir: icons_dir.into(),
            template: None,
            next_index: 0,
            title: String::new(),
            results: Vec::new(),
        }
    }

    /// Build a session from loaded configuration.
    pub fn from_config(
        source_id: impl Into<String>,
        definition: SourceDefinition,
        config: &Config,
    ) -> Self {
        let filters = FilterConfig::from_settings(&config.filters, config.sizes.general());
        Self::new(source_id, definition, filters, &config.sources.icons_dir)
            .with_filter_title(config.filters.filter_title)
    }

    /// Compare listing names against the searched title instead of
    /// themselves.
    pub fn with_filter_title(mut self, filter_title: bool) -> Self {
        self.filter_title = filter_title;
        self
    }

    /// Select the media category to search.
    ///
    /// Restarts the query sequence. With separate sizes enabled, the
    /// category's own size bounds replace the current ones.
    pub fn use_category(&mut self, category: MediaCategory, info: &MediaInfo, sizes: &SizeSettings) {
        if let Some(bounds) = sizes.bounds_for(category) {
            self.filters.set_sizes(bounds);
        }

        let template = build_queries(category, &self.definition, info);
        debug!(
            source = %self.source_id,
            category = %category,
            queries = template.pairs.len(),
            "Selected category"
        );

        self.title = template.info.title.clone();
        self.template = Some(template);
        self.next_index = 0;
    }

    /// Log the active keyword lists and size bounds.
    pub fn information(&self) {
        info!(
            source = %self.source_id,
            accepted = ?self.filters.quality_allow,
            blocked = ?self.filters.quality_deny,
            required = ?self.filters.require_keywords,
            min_size_gb = self.filters.size.min_gb(),
            max_size_gb = self.filters.size.max_gb(),
            "Filter settings"
        );
    }

    /// Expand the next query/extra pair into a search request.
    ///
    /// Returns `None` once the pairs are exhausted, when no category was
    /// selected, or when a query expands to nothing, which ends the
    /// sequence. The expanded query becomes the session title.
    pub fn next_query(&mut self) -> Option<SearchRequest> {
        let template = self.template.as_ref()?;
        let pair = template.pairs.get(self.next_index)?;

        let query = expand(&self.definition, &pair.query, &template.info);
        let extra = expand(&self.definition, &pair.extra, &template.info);
        debug!(
            source = %self.source_id,
            before = %pair.query,
            query = %query,
            extra = %extra,
            "Expanded query"
        );

        if query.trim().is_empty() {
            self.next_index = template.pairs.len();
            return None;
        }

        let request = SearchRequest::build(&self.definition, &template.url, &query, &extra);
        self.next_index += 1;
        self.title = query;

        metrics::QUERIES_EXPANDED
            .with_label_values(&[&self.source_id])
            .inc();
        info!(source = %self.source_id, url = %request.url, "Search URL");

        Some(request)
    }

    /// Verify one listing name and size against the session.
    pub fn verify(&self, name: Option<&str>, size: Option<&str>) -> Verdict {
        let title = if self.filter_title {
            TitleSource::Query(&self.title)
        } else {
            TitleSource::ListingName
        };
        verify(&self.definition.name, &self.filters, title, name, size)
    }

    /// Verify a batch of listings and keep the accepted ones.
    ///
    /// Returns how many were accepted.
    pub fn ingest(
        &mut self,
        listings: impl IntoIterator<Item = RawListing>,
        options: VerifyOptions,
    ) -> usize {
        self.information();
        let before = self.results.len();

        for listing in listings {
            let size = listing.size_text();
            let name = if options.verify_name {
                listing.name.as_deref()
            } else {
                Some(self.title.as_str())
            };
            let checked_size = if options.verify_size { size.as_deref() } else { None };

            let verdict = self.verify(name, checked_size);
            let outcome = match verdict.primary_reason() {
                None => "accepted",
                Some(reason) => reason.slug(),
            };
            metrics::LISTINGS_VERIFIED
                .with_label_values(&[&self.source_id, outcome])
                .inc();

            if !verdict.accepted {
                debug!(source = %self.source_id, "{}", verdict.reason);
                continue;
            }

            let accepted = self.accept(listing, size);
            self.results.push(accepted);
        }

        let accepted = self.results.len() - before;
        info!(
            source = %self.source_id,
            accepted,
            total = self.results.len(),
            "Listings accepted"
        );
        accepted
    }

    fn accept(&self, listing: RawListing, size: Option<String>) -> FilteredListing {
        let seeds = listing.seeds();
        let peers = listing.peers();
        FilteredListing {
            name: listing.name.unwrap_or_default(),
            uri: listing.uri,
            info_hash: listing.info_hash,
            size,
            seeds,
            peers,
            language: self.definition.language.clone(),
            provider: self.definition.name.clone(),
            icon: self.icons_dir.join(format!("{}.png", self.source_id)),
        }
    }

    /// Run every query through `fetcher` and return the accepted listings.
    ///
    /// A failed fetch skips that query.
    pub fn run<F>(mut self, fetcher: &mut F, options: VerifyOptions) -> Vec<FilteredListing>
    where
        F: ListingFetcher + ?Sized,
    {
        while let Some(request) = self.next_query() {
            match fetcher.fetch(&request) {
                Ok(listings) => {
                    self.ingest(listings, options);
                }
                Err(e) => {
                    warn!(
                        source = %self.source_id,
                        query = %request.query,
                        error = %e,
                        "Search failed"
                    );
                }
            }
        }
        self.finish()
    }

    /// Consume the session, returning the accepted listings in arrival
    /// order.
    pub fn finish(self) -> Vec<FilteredListing> {
        metrics::SESSION_RESULTS
            .with_label_values(&[&self.source_id])
            .observe(self.results.len() as f64);
        self.results
    }

    pub fn results(&self) -> &[FilteredListing] {
        &self.results
    }

    /// Title listing names are currently compared against.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }
}
