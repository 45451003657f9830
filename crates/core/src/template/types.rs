//! Types for query templating.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Media category a search is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    General,
    Movie,
    Episode,
    Season,
    Anime,
}

impl MediaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::General => "general",
            MediaCategory::Movie => "movie",
            MediaCategory::Episode => "episode",
            MediaCategory::Season => "season",
            MediaCategory::Anime => "anime",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" | "search" => Ok(MediaCategory::General),
            "movie" | "movies" => Ok(MediaCategory::Movie),
            "episode" | "show" => Ok(MediaCategory::Episode),
            "season" => Ok(MediaCategory::Season),
            "anime" => Ok(MediaCategory::Anime),
            other => Err(format!("unknown media category: {}", other)),
        }
    }
}

/// Metadata about the media being searched for. Supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Primary title.
    #[serde(default)]
    pub title: String,
    /// Alternate titles keyed by language code ("fr", "es", ...).
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub season: u32,
    #[serde(default)]
    pub episode: u32,
    /// Absolute episode number (anime).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_number: Option<u32>,
}

/// One query with the extra string that goes with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPair {
    pub query: String,
    pub extra: String,
}

/// Templates selected for a media category, not yet expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTemplate {
    pub category: MediaCategory,
    /// Search URL pattern (base URL plus category fragment).
    pub url: String,
    /// Query/extra templates in the order they must be run.
    pub pairs: Vec<QueryPair>,
    /// Metadata the templates expand against.
    pub info: MediaInfo,
}
