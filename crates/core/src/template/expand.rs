//! Placeholder expansion.
//!
//! Recognised placeholders:
//! - `{title}`, `{title:<lang>}`
//! - `{year}`
//! - `{season}`, `{season+N}`, `{season:N}`, `{season+t411season}`
//! - `{episode}`, `{episode+N}`, `{episode:N}`, `{episode+t411episode}`
//!
//! Anything else between braces is left untouched.

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};
use tracing::{debug, info};

use super::remap::{t411_episode, t411_season};
use super::{MediaCategory, MediaInfo, QueryPair, QueryTemplate, SourceDefinition};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Widest zero padding `{season:N}` accepts; wider placeholders stay literal.
const MAX_PAD_WIDTH: usize = 64;

/// How a season or episode number is rendered.
#[derive(Debug, Clone, Copy)]
enum NumberForm {
    Plain,
    Offset(i64),
    Remap(fn(u32) -> u32),
    Padded(usize),
}

#[derive(Debug, Clone)]
enum Placeholder<'a> {
    Title(Option<&'a str>),
    Year,
    Season(NumberForm),
    Episode(NumberForm),
}

/// Select the templates a source defines for `category`.
///
/// The URL pattern is the base URL plus the category fragment. Episodes and
/// seasons also pick up the secondary `keywords2`/`extra2` pair. For anime the
/// absolute episode number, when known, replaces the episode number.
pub fn build_queries(
    category: MediaCategory,
    definition: &SourceDefinition,
    info: &MediaInfo,
) -> QueryTemplate {
    let template = definition.template(category);
    let url = format!(
        "{}{}",
        definition.base_url,
        template.query.as_deref().unwrap_or_default()
    );
    debug!(category = %category, url = %url, "Selected category URL");

    let mut pairs = Vec::new();
    if let Some(keywords) = template.keywords.as_deref().filter(|k| !k.is_empty()) {
        pairs.push(QueryPair {
            query: keywords.to_string(),
            extra: template.extra.clone().unwrap_or_default(),
        });

        let has_secondary = matches!(category, MediaCategory::Episode | MediaCategory::Season);
        if has_secondary {
            if let Some(keywords2) = template.keywords2.as_deref().filter(|k| !k.is_empty()) {
                pairs.push(QueryPair {
                    query: keywords2.to_string(),
                    extra: template.extra2.clone().unwrap_or_default(),
                });
            }
        }
    }

    let mut info = info.clone();
    if category == MediaCategory::Anime {
        if let Some(absolute) = info.absolute_number.filter(|n| *n > 0) {
            info.episode = absolute;
        }
    }

    QueryTemplate {
        category,
        url,
        pairs,
        info,
    }
}

/// Expand every placeholder in `text`.
///
/// `definition` supplies the fallback language for translated titles.
/// Unknown or malformed placeholders are kept verbatim.
pub fn expand(definition: &SourceDefinition, text: &str, info: &MediaInfo) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let keyword = caps[1].to_lowercase();
            parse_placeholder(&keyword)
                .and_then(|placeholder| render(&placeholder, definition, info))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn parse_placeholder(keyword: &str) -> Option<Placeholder<'_>> {
    if keyword == "title" {
        return Some(Placeholder::Title(None));
    }
    if let Some(lang) = keyword.strip_prefix("title:") {
        return Some(Placeholder::Title(Some(lang).filter(|l| !l.is_empty())));
    }
    if keyword == "year" {
        return Some(Placeholder::Year);
    }
    if let Some(rest) = keyword.strip_prefix("season") {
        return parse_number_form(rest, "t411season", t411_season).map(Placeholder::Season);
    }
    if let Some(rest) = keyword.strip_prefix("episode") {
        return parse_number_form(rest, "t411episode", t411_episode).map(Placeholder::Episode);
    }
    None
}

fn parse_number_form(rest: &str, sentinel: &str, remap: fn(u32) -> u32) -> Option<NumberForm> {
    if rest.is_empty() {
        return Some(NumberForm::Plain);
    }
    if let Some(offset) = rest.strip_prefix('+') {
        if offset == sentinel {
            return Some(NumberForm::Remap(remap));
        }
        return offset.trim().parse::<i64>().ok().map(NumberForm::Offset);
    }
    if let Some(width) = rest.strip_prefix(':') {
        return width
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|w| *w <= MAX_PAD_WIDTH)
            .map(NumberForm::Padded);
    }
    None
}

/// Render a placeholder, or `None` when it cannot be rendered (an offset
/// that overflows) and must stay literal.
fn render(
    placeholder: &Placeholder<'_>,
    definition: &SourceDefinition,
    info: &MediaInfo,
) -> Option<String> {
    match placeholder {
        Placeholder::Title(lang) => Some(resolve_title(definition, info, *lang)),
        Placeholder::Year => Some(info.year.to_string()),
        Placeholder::Season(form) => render_number(info.season, *form),
        Placeholder::Episode(form) => render_number(info.episode, *form),
    }
}

fn render_number(value: u32, form: NumberForm) -> Option<String> {
    match form {
        NumberForm::Plain => Some(value.to_string()),
        NumberForm::Offset(offset) => i64::from(value).checked_add(offset).map(|n| n.to_string()),
        NumberForm::Remap(remap) => Some(remap(value).to_string()),
        NumberForm::Padded(width) => Some(format!("{:0width$}", value, width = width)),
    }
}

/// Pick the title for `{title}` / `{title:<lang>}`.
///
/// A requested language missing from the alternate titles falls back to the
/// source language. Translated titles have their periods removed.
fn resolve_title(definition: &SourceDefinition, info: &MediaInfo, lang: Option<&str>) -> String {
    if let Some(requested) = lang {
        if !info.titles.is_empty() {
            let lang = if info.titles.contains_key(requested) {
                requested
            } else {
                definition.language.as_str()
            };
            if let Some(title) = info.titles.get(lang).filter(|t| !t.is_empty()) {
                info!(
                    source = %definition.name,
                    language = lang,
                    title = %title,
                    "Using translated title"
                );
                return title.replace('.', "");
            }
        }
    }
    info.title.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::CategoryTemplate;

    fn firefly() -> MediaInfo {
        MediaInfo {
            title: "Firefly".to_string(),
            year: 2002,
            season: 1,
            episode: 3,
            ..MediaInfo::default()
        }
    }

    fn definition() -> SourceDefinition {
        SourceDefinition {
            name: "Example".to_string(),
            base_url: "https://example.org".to_string(),
            language: "fr".to_string(),
            ..SourceDefinition::default()
        }
    }

    #[test]
    fn test_expand_padded_season_episode() {
        let out = expand(&definition(), "{title} S{season:2}E{episode:2}", &firefly());
        assert_eq!(out, "Firefly S01E03");
    }

    #[test]
    fn test_expand_plain_and_year() {
        let out = expand(&definition(), "{title} {year} {season}x{episode}", &firefly());
        assert_eq!(out, "Firefly 2002 1x3");
    }

    #[test]
    fn test_expand_offsets() {
        let out = expand(&definition(), "s{season+1} e{episode+-1} e{episode+10}", &firefly());
        assert_eq!(out, "s2 e2 e13");
    }

    #[test]
    fn test_expand_remap_sentinels() {
        let mut info = firefly();
        info.episode = 9;
        let out = expand(&definition(), "{season+t411season}/{episode+t411episode}", &info);
        assert_eq!(out, "968/946");
    }

    #[test]
    fn test_expand_is_case_insensitive() {
        let out = expand(&definition(), "{TITLE} {Season:3}", &firefly());
        assert_eq!(out, "Firefly 001");
    }

    #[test]
    fn test_unresolved_placeholders_are_kept() {
        let out = expand(
            &definition(),
            "{title} {quality} {season:x} {episode+abc} {}",
            &firefly(),
        );
        assert_eq!(out, "Firefly {quality} {season:x} {episode+abc} {}");
    }

    #[test]
    fn test_overflowing_offset_stays_literal() {
        let out = expand(
            &definition(),
            "s{season+9223372036854775807} e{episode+-9223372036854775808}",
            &firefly(),
        );
        assert_eq!(out, "s{season+9223372036854775807} e-9223372036854775805");
    }

    #[test]
    fn test_oversized_padding_stays_literal() {
        let out = expand(&definition(), "s{season:70000} e{episode:64}", &firefly());
        assert!(out.starts_with("s{season:70000} e0"));
        assert_eq!(out.len(), "s{season:70000} e".len() + 64);
    }

    #[test]
    fn test_remap_at_numeric_limit() {
        let mut info = firefly();
        info.season = u32::MAX;
        info.episode = u32::MAX;
        let out = expand(&definition(), "{season+t411season}/{episode+t411episode}", &info);
        assert_eq!(out, format!("{}/{}", u32::MAX, u32::MAX));
    }

    #[test]
    fn test_translated_title() {
        let mut info = firefly();
        info.titles.insert("es".to_string(), "Luciérnaga".to_string());
        info.titles.insert("fr".to_string(), "Fire.fly".to_string());

        assert_eq!(expand(&definition(), "{title:es}", &info), "Luciérnaga");
        // Missing language falls back to the source language, periods removed
        assert_eq!(expand(&definition(), "{title:de}", &info), "Firefly");
        assert_eq!(expand(&definition(), "{title:fr}", &info), "Firefly");
        // No language requested: primary title
        assert_eq!(expand(&definition(), "{title}", &info), "Firefly");
    }

    #[test]
    fn test_translated_title_without_alternates() {
        assert_eq!(expand(&definition(), "{title:es}", &firefly()), "Firefly");
    }

    #[test]
    fn test_translated_title_fallback_missing_uses_primary() {
        let mut info = firefly();
        info.titles.insert("it".to_string(), "Lucciola".to_string());
        // Neither "de" nor the source language "fr" is available
        assert_eq!(expand(&definition(), "{title:de}", &info), "Firefly");
    }

    #[test]
    fn test_build_queries_episode_has_two_pairs() {
        let mut def = definition();
        def.episode = CategoryTemplate {
            query: Some("/search/QUERY/EXTRA".to_string()),
            keywords: Some("{title} S{season:2}E{episode:2}".to_string()),
            extra: Some("tv".to_string()),
            keywords2: Some("{title} {season}x{episode:2}".to_string()),
            extra2: None,
        };
        let template = build_queries(MediaCategory::Episode, &def, &firefly());
        assert_eq!(template.url, "https://example.org/search/QUERY/EXTRA");
        assert_eq!(template.pairs.len(), 2);
        assert_eq!(template.pairs[0].extra, "tv");
        assert_eq!(template.pairs[1].query, "{title} {season}x{episode:2}");
        assert_eq!(template.pairs[1].extra, "");
    }

    #[test]
    fn test_build_queries_movie_ignores_secondary() {
        let mut def = definition();
        def.movie = CategoryTemplate {
            query: None,
            keywords: Some("{title} {year}".to_string()),
            extra: None,
            keywords2: Some("{title}".to_string()),
            extra2: None,
        };
        let template = build_queries(MediaCategory::Movie, &def, &firefly());
        assert_eq!(template.url, "https://example.org");
        assert_eq!(template.pairs.len(), 1);
    }

    #[test]
    fn test_build_queries_without_keywords() {
        let template = build_queries(MediaCategory::Season, &definition(), &firefly());
        assert!(template.pairs.is_empty());
    }

    #[test]
    fn test_build_queries_anime_uses_absolute_number() {
        let mut def = definition();
        def.anime.keywords = Some("{title} {episode:3}".to_string());
        let mut info = firefly();
        info.absolute_number = Some(112);

        let template = build_queries(MediaCategory::Anime, &def, &info);
        assert_eq!(template.info.episode, 112);
        assert_eq!(expand(&def, &template.pairs[0].query, &template.info), "Firefly 112");

        // Other categories keep the season-relative episode
        let template = build_queries(MediaCategory::Episode, &def, &info);
        assert_eq!(template.info.episode, 3);
    }
}
