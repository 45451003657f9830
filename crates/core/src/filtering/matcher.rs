//! Phrase matching against normalized names.

/// Needle that matches every haystack.
pub const WILDCARD: &str = "*";

/// Check whether any of `needles` is present in `haystack`.
///
/// Each needle is a phrase; it matches when every whitespace-separated word
/// in it is found in the haystack. Underscores inside a word stand for
/// spaces, so `_cam_` looks for `cam` surrounded by spaces even in loose
/// mode. In strict mode every word is padded with spaces before the test,
/// which restricts matches to whole words. Comparison ignores case.
///
/// A needle list containing [`WILDCARD`] always matches. Blank needles never
/// match.
pub fn included<S: AsRef<str>>(haystack: &str, needles: &[S], strict: bool) -> bool {
    if needles.iter().any(|n| n.as_ref() == WILDCARD) {
        return true;
    }

    let haystack = format!(" {} ", haystack.to_lowercase());

    needles
        .iter()
        .any(|needle| phrase_matches(&haystack, needle.as_ref(), strict))
}

fn phrase_matches(padded_haystack: &str, phrase: &str, strict: bool) -> bool {
    let mut words = phrase.split_whitespace().peekable();
    if words.peek().is_none() {
        return false;
    }

    words.all(|word| {
        let word = word.to_lowercase().replace('_', " ");
        if strict {
            padded_haystack.contains(&format!(" {} ", word))
        } else {
            padded_haystack.contains(&word)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_respects_word_boundaries() {
        assert!(!included("webcam 1080p", &["cam"], true));
        assert!(included("webcam cam 1080p", &["cam"], true));
    }

    #[test]
    fn test_loose_allows_substrings() {
        assert!(included("hdcam release", &["cam"], false));
        assert!(included("webcam 1080p", &["cam"], false));
    }

    #[test]
    fn test_underscore_padding_in_loose_mode() {
        assert!(included("movie ts 2019", &["_ts_"], false));
        assert!(!included("movie its 2019", &["_ts_"], false));
        // Haystack edges count as boundaries
        assert!(included("cam", &["_cam_"], false));
    }

    #[test]
    fn test_phrase_requires_every_word() {
        assert!(included("the big bang theory s01e01", &["big theory"], true));
        assert!(!included("the big bang s01e01", &["big theory"], true));
    }

    #[test]
    fn test_any_needle_matches() {
        assert!(included("show 720p hdtv", &["1080p", "720p"], false));
        assert!(!included("show 480p", &["1080p", "720p"], false));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(included("show name", &["Show NAME"], true));
        assert!(included("SHOW NAME", &["show"], true));
    }

    #[test]
    fn test_wildcard() {
        assert!(included("anything at all", &["*"], true));
        assert!(included("", &["nope", "*"], false));
    }

    #[test]
    fn test_empty_needles() {
        let none: [&str; 0] = [];
        assert!(!included("show", &none, false));
        assert!(!included("show", &["", "   "], false));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let needles = vec!["1080p".to_string()];
        assert!(included("show 1080p", &needles, true));
    }
}
