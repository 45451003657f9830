//! Quality-aware ranking.

use serde::Serialize;
use tracing::info;

use crate::config::RankingConfig;

use super::dedup::cleanup;
use super::Rankable;

/// Resolution tier inferred from a listing name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QualityTier {
    Sd480,
    Hd720,
    Hd1080,
    Uhd2160,
}

impl QualityTier {
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Sd480 => "480p",
            QualityTier::Hd720 => "720p",
            QualityTier::Hd1080 => "1080p",
            QualityTier::Uhd2160 => "2160p",
        }
    }

    pub fn is_hd(&self) -> bool {
        *self >= QualityTier::Hd720
    }
}

/// Tier for a listing name.
///
/// Tags are checked in the order 480p, 720p, 1080p, 3d, 4k and each hit
/// overwrites the previous one, so the last matching tag decides. Names
/// without any tag are 480p.
pub fn check_quality(text: &str) -> QualityTier {
    let text = text.to_lowercase();
    let mut tier = QualityTier::Sd480;

    for (tag, tag_tier) in [
        ("480p", QualityTier::Sd480),
        ("720p", QualityTier::Hd720),
        ("1080p", QualityTier::Hd1080),
        ("3d", QualityTier::Hd1080),
        ("4k", QualityTier::Uhd2160),
    ] {
        if text.contains(tag) {
            tier = tag_tier;
        }
    }

    tier
}

/// A listing with its inferred quality.
#[derive(Debug, Clone)]
pub struct RankedListing<T> {
    pub listing: T,
    pub quality: QualityTier,
    pub hd: bool,
}

impl<T: Rankable> RankedListing<T> {
    fn sort_key(&self) -> (u32, bool, QualityTier, u32) {
        (
            self.listing.seeds(),
            self.hd,
            self.quality,
            self.listing.peers(),
        )
    }
}

/// Sort by seeds, then HD, then quality tier, then peers (all descending).
pub fn sort_by_quality<T: Rankable>(listings: Vec<T>) -> Vec<RankedListing<T>> {
    info!(count = listings.len(), "Applying quality sorting");
    let mut ranked: Vec<_> = listings
        .into_iter()
        .map(|listing| {
            let quality = check_quality(listing.name().unwrap_or_default());
            RankedListing {
                listing,
                quality,
                hd: quality.is_hd(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    ranked
}

/// The final pass over a session's accepted listings: dedup, then rank.
pub fn apply_filters<T: Rankable>(listings: Vec<T>, ranking: &RankingConfig) -> Vec<T> {
    let cleaned = cleanup(listings);
    if !ranking.sort_by_quality {
        return cleaned;
    }
    sort_by_quality(cleaned)
        .into_iter()
        .map(|ranked| ranked.listing)
        .collect()
}
