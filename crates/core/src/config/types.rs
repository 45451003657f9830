use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::filtering::QualityTag;
use crate::template::MediaCategory;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub filters: FilterSettings,
    #[serde(default)]
    pub sizes: SizeSettings,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// User filter settings: quality toggles plus free-text keyword lists.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterSettings {
    /// Per-tag toggles. Tags missing from the table use their built-in default.
    #[serde(default)]
    pub quality: BTreeMap<QualityTag, bool>,
    /// Enables the `accept`, `block` and `require` lists below.
    #[serde(default)]
    pub additional_filters: bool,
    /// Extra allow-list keywords, comma separated.
    #[serde(default)]
    pub accept: String,
    /// Extra deny-list keywords, comma separated.
    #[serde(default)]
    pub block: String,
    /// Keywords that must all be present, comma separated.
    #[serde(default)]
    pub require: String,
    /// Match listing names against the query title instead of themselves.
    #[serde(default)]
    pub filter_title: bool,
}

impl FilterSettings {
    /// Whether the given quality tag is accepted.
    pub fn quality_enabled(&self, tag: QualityTag) -> bool {
        self.quality
            .get(&tag)
            .copied()
            .unwrap_or_else(|| tag.enabled_by_default())
    }
}

/// Size bounds in GB.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SizeBounds {
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max_size")]
    pub max: f64,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_max_size(),
        }
    }
}

/// Size settings (all values in GB).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SizeSettings {
    #[serde(default)]
    pub min_size: f64,
    #[serde(default = "default_max_size")]
    pub max_size: f64,
    /// Use the per-category bounds below instead of `min_size`/`max_size`.
    #[serde(default)]
    pub separate_sizes: bool,
    #[serde(default)]
    pub movies: SizeBounds,
    #[serde(default)]
    pub episodes: SizeBounds,
    #[serde(default)]
    pub seasons: SizeBounds,
}

impl Default for SizeSettings {
    fn default() -> Self {
        Self {
            min_size: 0.0,
            max_size: default_max_size(),
            separate_sizes: false,
            movies: SizeBounds::default(),
            episodes: SizeBounds::default(),
            seasons: SizeBounds::default(),
        }
    }
}

impl SizeSettings {
    /// Bounds used before any category is selected.
    pub fn general(&self) -> SizeBounds {
        SizeBounds {
            min: self.min_size,
            max: self.max_size,
        }
    }

    /// Category-specific bounds, if separate sizes are enabled for it.
    ///
    /// Anime shares the episode bounds. The general category never switches.
    pub fn bounds_for(&self, category: MediaCategory) -> Option<SizeBounds> {
        if !self.separate_sizes {
            return None;
        }
        match category {
            MediaCategory::General => None,
            MediaCategory::Movie => Some(self.movies),
            MediaCategory::Episode | MediaCategory::Anime => Some(self.episodes),
            MediaCategory::Season => Some(self.seasons),
        }
    }
}

fn default_max_size() -> f64 {
    10.0
}

/// Result ranking configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Rank by (seeds, hd, quality tier, peers) instead of seeds only.
    #[serde(default)]
    pub sort_by_quality: bool,
}

/// Where source definitions and icons live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_definitions_path")]
    pub definitions: PathBuf,
    #[serde(default = "default_icons_dir")]
    pub icons_dir: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            definitions: default_definitions_path(),
            icons_dir: default_icons_dir(),
        }
    }
}

fn default_definitions_path() -> PathBuf {
    PathBuf::from("sources.toml")
}

fn default_icons_dir() -> PathBuf {
    PathBuf::from("icons")
}
