//! Per-source static definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::MediaCategory;

/// URL fragment and keyword templates for one media category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTemplate {
    /// URL fragment appended to the base URL. May contain `QUERY`/`EXTRA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    /// Secondary template, run after the primary one (episodes and seasons).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra2: Option<String>,
}

/// Static description of a search source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Display color. Carried through for the presentation layer.
    #[serde(default)]
    pub color: String,
    /// Language of the source; also the fallback for `{title:<lang>}`.
    #[serde(default = "default_language")]
    pub language: String,
    pub base_url: String,
    /// Replaces spaces in the final search URL.
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub general: CategoryTemplate,
    #[serde(default)]
    pub movie: CategoryTemplate,
    #[serde(default)]
    pub episode: CategoryTemplate,
    #[serde(default)]
    pub season: CategoryTemplate,
    #[serde(default)]
    pub anime: CategoryTemplate,
    /// POST form fields; `QUERY` in a value is replaced by the query.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub post_data: BTreeMap<String, String>,
    /// GET parameters; `QUERY` in a value is replaced by the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_data: Option<BTreeMap<String, String>>,
}

impl Default for SourceDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: String::new(),
            language: default_language(),
            base_url: String::new(),
            separator: default_separator(),
            general: CategoryTemplate::default(),
            movie: CategoryTemplate::default(),
            episode: CategoryTemplate::default(),
            season: CategoryTemplate::default(),
            anime: CategoryTemplate::default(),
            post_data: BTreeMap::new(),
            get_data: None,
        }
    }
}

impl SourceDefinition {
    /// Templates for a media category.
    pub fn template(&self, category: MediaCategory) -> &CategoryTemplate {
        match category {
            MediaCategory::General => &self.general,
            MediaCategory::Movie => &self.movie,
            MediaCategory::Episode => &self.episode,
            MediaCategory::Season => &self.season,
            MediaCategory::Anime => &self.anime,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_separator() -> String {
    "%20".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_definition_defaults() {
        let def: SourceDefinition = toml::from_str(r#"base_url = "https://example.org""#).unwrap();
        assert_eq!(def.language, "en");
        assert_eq!(def.separator, "%20");
        assert!(def.post_data.is_empty());
        assert!(def.get_data.is_none());
        assert_eq!(def.template(MediaCategory::Movie), &CategoryTemplate::default());
    }

    #[test]
    fn test_deserialize_definition_with_categories() {
        let toml = r#"
name = "Example"
color = "FFF14E13"
language = "fr"
base_url = "https://example.org"
separator = "+"

[episode]
query = "/search?q=QUERY"
keywords = "{title} S{season:2}E{episode:2}"
keywords2 = "{title} {season}x{episode:2}"

[post_data]
search = "QUERY"
"#;
        let def: SourceDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.separator, "+");
        let episode = def.template(MediaCategory::Episode);
        assert_eq!(episode.query.as_deref(), Some("/search?q=QUERY"));
        assert_eq!(episode.keywords2.as_deref(), Some("{title} {season}x{episode:2}"));
        assert!(episode.extra.is_none());
        assert_eq!(def.post_data["search"], "QUERY");
    }
}
