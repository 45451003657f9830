//! Search request building.

use std::collections::BTreeMap;

use crate::template::SourceDefinition;

use super::SearchRequest;

impl SearchRequest {
    /// Substitute an expanded query into a source's URL pattern and payloads.
    ///
    /// `QUERY` and `EXTRA` are replaced first, then spaces become the
    /// source's separator, then `FIRSTLETTER` becomes the first character of
    /// the query. Payload values only get `QUERY` substituted. Auth tokens
    /// (`TOKEN`, `CSRF_*`) are left for the login layer.
    pub fn build(definition: &SourceDefinition, url_pattern: &str, query: &str, extra: &str) -> Self {
        let first_letter: String = query.chars().take(1).collect();
        let url = url_pattern
            .replace("QUERY", query)
            .replace("EXTRA", extra)
            .replace(' ', &definition.separator)
            .replace("FIRSTLETTER", &first_letter);

        Self {
            query: query.to_string(),
            extra: extra.to_string(),
            url,
            post_data: substitute_query(&definition.post_data, query),
            get_data: definition
                .get_data
                .as_ref()
                .map(|data| substitute_query(data, query)),
        }
    }
}

fn substitute_query(data: &BTreeMap<String, String>, query: &str) -> BTreeMap<String, String> {
    data.iter()
        .map(|(key, value)| (key.clone(), value.replace("QUERY", query)))
        .collect()
}
