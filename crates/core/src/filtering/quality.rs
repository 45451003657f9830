//! Quality tags and the keywords that identify them in listing names.

use serde::{Deserialize, Serialize};

/// A user-toggleable quality tag.
///
/// Enabled tags contribute their keywords to the allow-list, disabled tags
/// to the deny-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTag {
    #[serde(rename = "480p")]
    Q480p,
    #[serde(rename = "720p")]
    Q720p,
    #[serde(rename = "1080p")]
    Q1080p,
    #[serde(rename = "2k")]
    Q2k,
    #[serde(rename = "4k")]
    Q4k,
    #[serde(rename = "brrip")]
    Brrip,
    #[serde(rename = "webdl")]
    Webdl,
    #[serde(rename = "hdrip")]
    Hdrip,
    #[serde(rename = "hdtv")]
    Hdtv,
    #[serde(rename = "dvd")]
    Dvd,
    #[serde(rename = "dvdscr")]
    Dvdscr,
    #[serde(rename = "screener")]
    Screener,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "telesync")]
    Telesync,
    #[serde(rename = "cam")]
    Cam,
    #[serde(rename = "trailer")]
    Trailer,
}

impl QualityTag {
    /// Every tag, in table order.
    pub const ALL: [QualityTag; 16] = [
        QualityTag::Q480p,
        QualityTag::Q720p,
        QualityTag::Q1080p,
        QualityTag::Q2k,
        QualityTag::Q4k,
        QualityTag::Brrip,
        QualityTag::Webdl,
        QualityTag::Hdrip,
        QualityTag::Hdtv,
        QualityTag::Dvd,
        QualityTag::Dvdscr,
        QualityTag::Screener,
        QualityTag::ThreeD,
        QualityTag::Telesync,
        QualityTag::Cam,
        QualityTag::Trailer,
    ];

    /// Keywords matched (loosely) against normalized names.
    ///
    /// Underscores mark word boundaries, see [`super::included`].
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            QualityTag::Q480p => &["480p"],
            QualityTag::Q720p => &["720p"],
            QualityTag::Q1080p => &["1080p"],
            QualityTag::Q2k => &["_2k_", "1440p"],
            QualityTag::Q4k => &["_4k_", "2160p"],
            QualityTag::Brrip => &["brrip", "bdrip", "bluray"],
            QualityTag::Webdl => &["webdl", "webrip"],
            QualityTag::Hdrip => &["hdrip"],
            QualityTag::Hdtv => &["hdtv"],
            QualityTag::Dvd => &["_dvd_", "dvdrip"],
            QualityTag::Dvdscr => &["dvdscr"],
            QualityTag::Screener => &["screener", "_scr_"],
            QualityTag::ThreeD => &["_3d_"],
            QualityTag::Telesync => &["telesync", "_ts_", "_tc_"],
            QualityTag::Cam => &["_cam_", "hdcam"],
            QualityTag::Trailer => &["trailer"],
        }
    }

    /// Whether the tag is accepted when the settings do not mention it.
    pub fn enabled_by_default(&self) -> bool {
        !matches!(
            self,
            QualityTag::Dvdscr
                | QualityTag::Screener
                | QualityTag::ThreeD
                | QualityTag::Telesync
                | QualityTag::Cam
                | QualityTag::Trailer
        )
    }
}
