//! Accept/reject decision for one listing.

use std::fmt;

use tracing::debug;

use super::config::FilterConfig;
use super::matcher::included;
use super::normalize::{apply_aliases, normalize};
use super::size::parse_size;

/// Why a listing was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    EmptyName,
    NameMismatch,
    MissingRequiredKeyword,
    MissingAnyRequiredKeyword,
    BlockedByKeyword,
    SizeOutOfRange,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::EmptyName => "empty name",
            RejectReason::NameMismatch => "name mismatch",
            RejectReason::MissingRequiredKeyword => "missing required keyword",
            RejectReason::MissingAnyRequiredKeyword => "missing any required keyword",
            RejectReason::BlockedByKeyword => "blocked by keyword",
            RejectReason::SizeOutOfRange => "size out of range",
        }
    }

    /// Metric label.
    pub fn slug(&self) -> &'static str {
        match self {
            RejectReason::EmptyName => "empty_name",
            RejectReason::NameMismatch => "name_mismatch",
            RejectReason::MissingRequiredKeyword => "missing_required_keyword",
            RejectReason::MissingAnyRequiredKeyword => "missing_any_required_keyword",
            RejectReason::BlockedByKeyword => "blocked_by_keyword",
            RejectReason::SizeOutOfRange => "size_out_of_range",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`verify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub accepted: bool,
    /// Every failed check, in the order they were found.
    pub reasons: Vec<RejectReason>,
    /// Diagnostic line: source, normalized name, then the failure reasons.
    pub reason: String,
}

impl Verdict {
    fn reject(mut self, reason: RejectReason) -> Self {
        self.accepted = false;
        self.reason.push(' ');
        self.reason.push_str(reason.as_str());
        self.reasons.push(reason);
        self
    }

    /// The first failure, if any.
    pub fn primary_reason(&self) -> Option<RejectReason> {
        self.reasons.first().copied()
    }
}

/// Which title the listing name must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource<'a> {
    /// Compare against the listing's own name, so only the keyword and
    /// size checks can reject.
    ListingName,
    /// Compare against the title the session searched for.
    Query(&'a str),
}

/// Check a listing name and size against `config`.
///
/// The name is aliased and normalized first. It must contain the title as
/// whole words, either as given or in normalized form. Required keywords
/// are then checked as case-sensitive substrings of the normalized name,
/// stopping at the first missing one. Without required keywords the
/// allow-list must match and the deny-list must not; both failures are
/// reported when both happen. A supplied size must fall inside the configured window, and
/// text that cannot be parsed counts as zero bytes.
pub fn verify(
    source: &str,
    config: &FilterConfig,
    title: TitleSource<'_>,
    name: Option<&str>,
    size: Option<&str>,
) -> Verdict {
    let Some(raw_name) = name.filter(|n| !n.is_empty()) else {
        return Verdict {
            accepted: false,
            reasons: vec![RejectReason::EmptyName],
            reason: format!("[{}] *** {} ***", source, RejectReason::EmptyName),
        };
    };

    let name = normalize(&apply_aliases(raw_name));
    let title = match title {
        TitleSource::Query(title) => title.to_string(),
        TitleSource::ListingName => name.clone(),
    };
    let normalized_title = normalize(&title);
    let titles = if title != normalized_title {
        vec![title, normalized_title]
    } else {
        vec![title]
    };

    let verdict = Verdict {
        accepted: true,
        reasons: Vec::new(),
        reason: format!("[{}] {:>70} ***", source, name),
    };

    if !included(&name, &titles, true) {
        return verdict.reject(RejectReason::NameMismatch);
    }

    let mut verdict = verdict;
    if !name.is_empty() {
        for reason in keyword_failures(config, &name) {
            verdict = verdict.reject(reason);
        }
    }

    if let Some(size) = size.filter(|s| !s.trim().is_empty()) {
        let bytes = parse_size(size).unwrap_or_else(|| {
            debug!(size = %size, "Unparseable size, treating as 0 bytes");
            0
        });
        if !config.size.contains(bytes) {
            verdict = verdict.reject(RejectReason::SizeOutOfRange);
        }
    }

    verdict
}

fn keyword_failures(config: &FilterConfig, name: &str) -> Vec<RejectReason> {
    let mut failures = Vec::new();
    if !config.require_keywords.is_empty() {
        if let Some(missing) = config
            .require_keywords
            .iter()
            .find(|required| !name.contains(required.as_str()))
        {
            debug!(keyword = %missing, "Required keyword missing");
            failures.push(RejectReason::MissingRequiredKeyword);
        }
        return failures;
    }
    if !included(name, &config.quality_allow, false) {
        failures.push(RejectReason::MissingAnyRequiredKeyword);
    }
    if included(name, &config.quality_deny, false) {
        failures.push(RejectReason::BlockedByKeyword);
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::SizeRange;

    fn config(allow: &[&str], deny: &[&str], require: &[&str]) -> FilterConfig {
        FilterConfig {
            quality_allow: allow.iter().map(|s| s.to_string()).collect(),
            quality_deny: deny.iter().map(|s| s.to_string()).collect(),
            require_keywords: require.iter().map(|s| s.to_string()).collect(),
            size: SizeRange::new(0.5, 5.0),
        }
    }

    #[test]
    fn test_end_to_end_accept_and_block() {
        let config = config(&["1080p"], &["cam"], &[]);

        let accepted = verify(
            "Example",
            &config,
            TitleSource::Query("Show Name"),
            Some("Show.Name.1080p.WEB"),
            Some("1.2GB"),
        );
        assert!(accepted.accepted, "{}", accepted.reason);
        assert!(accepted.reasons.is_empty());

        let blocked = verify(
            "Example",
            &config,
            TitleSource::Query("Show Name"),
            Some("Show.Name.CAM"),
            Some("1.2GB"),
        );
        assert!(!blocked.accepted);
        assert!(blocked.reason.contains("blocked by keyword"));
        assert_eq!(
            blocked.reasons,
            vec![RejectReason::MissingAnyRequiredKeyword, RejectReason::BlockedByKeyword]
        );
    }

    #[test]
    fn test_blocked_by_keyword() {
        let config = config(&["*"], &["cam"], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Show Name"),
            Some("Show.Name.CAM"),
            Some("1.2GB"),
        );
        assert!(!verdict.accepted);
        assert_eq!(verdict.primary_reason(), Some(RejectReason::BlockedByKeyword));
        assert!(verdict.reason.ends_with("blocked by keyword"));
    }

    #[test]
    fn test_wildcard_allow_list() {
        let config = config(&["*"], &["telesync"], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::ListingName,
            Some("Anything Goes 2019"),
            None,
        );
        assert!(verdict.accepted, "{}", verdict.reason);
    }

    #[test]
    fn test_required_keyword_short_circuits() {
        let config = config(&["1080p"], &[], &["x264"]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Show"),
            Some("Show 1080p HEVC"),
            None,
        );
        assert!(!verdict.accepted);
        assert!(verdict.reason.contains("missing required keyword"));
        assert_eq!(verdict.reasons, vec![RejectReason::MissingRequiredKeyword]);
    }

    #[test]
    fn test_required_keywords_are_case_sensitive() {
        let config = config(&[], &[], &["x264"]);
        let lower = verify("Example", &config, TitleSource::Query("Show"), Some("Show X264"), None);
        // the name is lowercased by normalization
        assert!(lower.accepted);

        let upper = FilterConfig {
            require_keywords: vec!["X264".to_string()],
            ..config
        };
        let verdict = verify("Example", &upper, TitleSource::Query("Show"), Some("Show X264"), None);
        assert!(!verdict.accepted);
    }

    #[test]
    fn test_required_keywords_skip_allow_list() {
        let config = config(&["2160p"], &["x264"], &["x264"]);
        let verdict = verify("Example", &config, TitleSource::Query("Show"), Some("Show x264"), None);
        assert!(verdict.accepted, "{}", verdict.reason);
    }

    #[test]
    fn test_empty_name() {
        let config = config(&["*"], &[], &[]);
        for name in [None, Some("")] {
            let verdict = verify("Example", &config, TitleSource::ListingName, name, None);
            assert!(!verdict.accepted);
            assert_eq!(verdict.reasons, vec![RejectReason::EmptyName]);
            assert_eq!(verdict.reason, "[Example] *** empty name ***");
        }
    }

    #[test]
    fn test_name_mismatch() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Firefly"),
            Some("Serenity 2005 1080p"),
            Some("1 GB"),
        );
        assert!(!verdict.accepted);
        assert_eq!(verdict.reasons, vec![RejectReason::NameMismatch]);
        assert!(verdict.reason.starts_with("[Example] "));
        assert!(verdict.reason.ends_with("*** name mismatch"));
    }

    #[test]
    fn test_title_must_match_whole_words() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Cam"),
            Some("Webcam Show"),
            None,
        );
        assert_eq!(verdict.primary_reason(), Some(RejectReason::NameMismatch));
    }

    #[test]
    fn test_normalized_title_matches() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Marvel's Agents of S.H.I.E.L.D."),
            Some("Marvels.Agents.of.S.H.I.E.L.D.S01E01.720p"),
            None,
        );
        assert!(verdict.accepted, "{}", verdict.reason);
    }

    #[test]
    fn test_accented_title_matches_plain_name() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Amélie"),
            Some("Amelie.2001.1080p"),
            None,
        );
        assert!(verdict.accepted, "{}", verdict.reason);
    }

    #[test]
    fn test_size_out_of_range_accumulates() {
        let config = config(&["1080p"], &["cam"], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Show"),
            Some("Show CAM"),
            Some("12 GB"),
        );
        assert!(!verdict.accepted);
        assert_eq!(
            verdict.reasons,
            vec![
                RejectReason::MissingAnyRequiredKeyword,
                RejectReason::BlockedByKeyword,
                RejectReason::SizeOutOfRange
            ]
        );
    }

    #[test]
    fn test_size_bounds_inclusive() {
        let config = config(&["*"], &[], &[]);
        for size in ["500 MB", "5 GB"] {
            let verdict = verify("Example", &config, TitleSource::ListingName, Some("Show"), Some(size));
            assert!(verdict.accepted, "{}", size);
        }
    }

    #[test]
    fn test_size_with_non_breaking_space() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::ListingName,
            Some("Show"),
            Some("1.2\u{a0}GB"),
        );
        assert!(verdict.accepted, "{}", verdict.reason);
    }

    #[test]
    fn test_unparseable_size_counts_as_zero() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::ListingName,
            Some("Show"),
            Some("unknown"),
        );
        assert_eq!(verdict.reasons, vec![RejectReason::SizeOutOfRange]);
    }

    #[test]
    fn test_missing_size_is_not_checked() {
        let config = config(&["*"], &[], &[]);
        for size in [None, Some(""), Some("  ")] {
            let verdict = verify("Example", &config, TitleSource::ListingName, Some("Show"), size);
            assert!(verdict.accepted);
        }
    }

    #[test]
    fn test_aliases_applied_to_name() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify(
            "Example",
            &config,
            TitleSource::Query("Law and Order SVU"),
            Some("Law and Order Special Victims Unit S01E01 720p"),
            None,
        );
        assert!(verdict.accepted, "{}", verdict.reason);
    }

    #[test]
    fn test_reason_pads_name() {
        let config = config(&["*"], &[], &[]);
        let verdict = verify("Src", &config, TitleSource::ListingName, Some("Show"), None);
        assert_eq!(verdict.reason, format!("[Src] {:>70} ***", "show"));
    }
}
