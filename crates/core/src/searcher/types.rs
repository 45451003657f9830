//! Types for listings and the fetch boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// A scalar as scraped from a source: sites report seeds, peers and sizes
/// either as numbers or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(i64),
    Text(String),
}

impl RawValue {
    /// Interpret as a non-negative count. Text keeps only its digits
    /// ("1,234" is 1234); negative or empty values count as zero.
    pub fn as_count(&self) -> u32 {
        match self {
            RawValue::Number(n) => u32::try_from(*n).unwrap_or(if *n < 0 { 0 } else { u32::MAX }),
            RawValue::Text(text) => {
                let text = text.trim();
                if text.starts_with('-') {
                    return 0;
                }
                let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
                digits.parse::<u64>().map(|n| n.min(u32::MAX as u64) as u32).unwrap_or(0)
            }
        }
    }

    /// Interpret as free text, trimmed. Numbers render as plain digits.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(text) => text.trim().to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(i64::from(value))
    }
}

/// One scraped row, as received from a source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub info_hash: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub size: Option<RawValue>,
    #[serde(default)]
    pub seeds: Option<RawValue>,
    #[serde(default)]
    pub peers: Option<RawValue>,
}

impl RawListing {
    /// Size text with surrounding whitespace removed; blank counts as absent.
    pub fn size_text(&self) -> Option<String> {
        self.size
            .as_ref()
            .map(RawValue::as_text)
            .filter(|s| !s.is_empty())
    }
}

/// A listing that passed verification, tagged with its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredListing {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub seeds: u32,
    pub peers: u32,
    pub language: String,
    /// Display name of the source.
    pub provider: String,
    /// Icon path for the source.
    pub icon: PathBuf,
}

/// Fields the dedup and ranking pass reads from a listing.
pub trait Rankable {
    fn name(&self) -> Option<&str>;
    fn uri(&self) -> Option<&str>;
    fn info_hash(&self) -> Option<&str>;
    fn seeds(&self) -> u32;
    fn peers(&self) -> u32;

    /// Source label, for logging.
    fn provider(&self) -> Option<&str> {
        None
    }
}

impl Rankable for RawListing {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn info_hash(&self) -> Option<&str> {
        self.info_hash.as_deref()
    }

    fn seeds(&self) -> u32 {
        self.seeds.as_ref().map(RawValue::as_count).unwrap_or(0)
    }

    fn peers(&self) -> u32 {
        self.peers.as_ref().map(RawValue::as_count).unwrap_or(0)
    }
}

impl Rankable for FilteredListing {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn info_hash(&self) -> Option<&str> {
        self.info_hash.as_deref()
    }

    fn seeds(&self) -> u32 {
        self.seeds
    }

    fn peers(&self) -> u32 {
        self.peers
    }

    fn provider(&self) -> Option<&str> {
        Some(self.provider.as_str())
    }
}

/// A fully expanded search, ready for the network layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Expanded query.
    pub query: String,
    /// Expanded extra string.
    pub extra: String,
    /// Search URL with `QUERY`, `EXTRA` and `FIRSTLETTER` substituted.
    pub url: String,
    /// POST form fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub post_data: BTreeMap<String, String>,
    /// GET parameters, when the source sends them separately from the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_data: Option<BTreeMap<String, String>>,
}

/// Errors reported by the network collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Source request failed: {0}")]
    RequestFailed(String),
}

/// Boundary to whatever performs the network fetch for a search.
pub trait ListingFetcher {
    /// Run one search and return the rows it produced.
    fn fetch(&mut self, request: &SearchRequest) -> Result<Vec<RawListing>, FetchError>;
}

impl<F> ListingFetcher for F
where
    F: FnMut(&SearchRequest) -> Result<Vec<RawListing>, FetchError>,
{
    fn fetch(&mut self, request: &SearchRequest) -> Result<Vec<RawListing>, FetchError> {
        self(request)
    }
}
