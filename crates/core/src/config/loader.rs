use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::template::SourceDefinition;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SIEVE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct DefinitionsFile {
    #[serde(default)]
    sources: BTreeMap<String, SourceDefinition>,
}

/// Load source definitions, keyed by source id.
pub fn load_definitions(path: &Path) -> Result<BTreeMap<String, SourceDefinition>, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
    load_definitions_from_str(&contents)
}

/// Load source definitions from a TOML string.
pub fn load_definitions_from_str(
    toml_str: &str,
) -> Result<BTreeMap<String, SourceDefinition>, ConfigError> {
    let file: DefinitionsFile =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    Ok(file.sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[filters]
additional_filters = true
accept = "x264, hevc"

[sizes]
min_size = 0.5
max_size = 5
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(config.filters.additional_filters);
        assert_eq!(config.filters.accept, "x264, hevc");
        assert_eq!(config.sizes.max_size, 5.0);
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[sizes]
min_size = "small"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/sieve.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[ranking]
sort_by_quality = true

[sources]
icons_dir = "/opt/icons"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert!(config.ranking.sort_by_quality);
        assert_eq!(config.sources.icons_dir.to_string_lossy(), "/opt/icons");
    }

    #[test]
    fn test_load_definitions_from_str() {
        let toml = r#"
[sources.example]
name = "Example"
base_url = "https://example.org"

[sources.example.movie]
query = "/search/QUERY/"
keywords = "{title} {year}"
"#;
        let definitions = load_definitions_from_str(toml).unwrap();
        let def = &definitions["example"];
        assert_eq!(def.name, "Example");
        assert_eq!(def.language, "en");
        assert_eq!(def.movie.keywords.as_deref(), Some("{title} {year}"));
    }

    #[test]
    fn test_load_definitions_missing_file() {
        let result = load_definitions(Path::new("/nonexistent/sources.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
