//! Filter configuration for one filtering session.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::warn;

use crate::config::{FilterSettings, SizeBounds};

use super::quality::QualityTag;

/// Separator used by the free-text keyword lists ("a, b,c").
static LIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s?").unwrap());

/// Bytes per GB. Size settings are decimal gigabytes.
pub const BYTES_PER_GB: f64 = 1e9;

/// Inclusive size window, in GB.
///
/// Invariant: `min_gb <= max_gb`. Constructing a range with the bounds the
/// wrong way round moves the minimum to one GB below the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    min_gb: f64,
    max_gb: f64,
}

impl SizeRange {
    pub fn new(min_gb: f64, max_gb: f64) -> Self {
        if min_gb > max_gb {
            warn!(
                min_gb,
                max_gb, "Minimum size above maximum, using max size minus 1 GB"
            );
            return Self {
                min_gb: max_gb - 1.0,
                max_gb,
            };
        }
        Self { min_gb, max_gb }
    }

    pub fn min_gb(&self) -> f64 {
        self.min_gb
    }

    pub fn max_gb(&self) -> f64 {
        self.max_gb
    }

    pub fn min_bytes(&self) -> f64 {
        self.min_gb * BYTES_PER_GB
    }

    pub fn max_bytes(&self) -> f64 {
        self.max_gb * BYTES_PER_GB
    }

    /// Whether `bytes` lies within the window (both ends inclusive).
    pub fn contains(&self, bytes: u64) -> bool {
        let bytes = bytes as f64;
        self.min_bytes() <= bytes && bytes <= self.max_bytes()
    }
}

impl From<SizeBounds> for SizeRange {
    fn from(bounds: SizeBounds) -> Self {
        SizeRange::new(bounds.min, bounds.max)
    }
}

/// Accept/deny/require keyword policy plus the active size window.
///
/// Built once per session. Only the size window changes afterwards, when a
/// media category with its own bounds is selected.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub quality_allow: Vec<String>,
    pub quality_deny: Vec<String>,
    pub require_keywords: Vec<String>,
    pub size: SizeRange,
}

impl FilterConfig {
    /// Build the keyword lists from user settings.
    ///
    /// Enabled quality tags feed the allow-list, disabled ones the deny-list.
    /// When additional filters are on, `accept`, `block` and `require` are
    /// split on commas and appended.
    pub fn from_settings(settings: &FilterSettings, sizes: SizeBounds) -> Self {
        let mut quality_allow = Vec::new();
        let mut quality_deny = Vec::new();
        let mut require_keywords = Vec::new();

        for tag in QualityTag::ALL {
            let keywords = tag.keywords().iter().map(|k| k.to_string());
            if settings.quality_enabled(tag) {
                quality_allow.extend(keywords);
            } else {
                quality_deny.extend(keywords);
            }
        }

        if settings.additional_filters {
            quality_allow.extend(split_list(settings.accept.trim()));
            quality_deny.extend(split_list(&settings.block));
            require_keywords = split_list(&settings.require);
        }

        dedup_in_place(&mut quality_allow);
        dedup_in_place(&mut quality_deny);

        Self {
            quality_allow,
            quality_deny,
            require_keywords,
            size: sizes.into(),
        }
    }

    /// Replace the size window, re-checking the min/max invariant.
    pub fn set_sizes(&mut self, bounds: SizeBounds) {
        self.size = bounds.into();
    }
}

fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    LIST_SEPARATOR
        .split(value)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn dedup_in_place(values: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    values.retain(|v| seen.insert(v.clone()));
}
