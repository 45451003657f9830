use std::collections::BTreeMap;

use crate::template::SourceDefinition;

use super::{types::Config, ConfigError, SizeBounds};

/// Validate configuration
/// Currently validates:
/// - Every size bound is finite and non-negative
///
/// A minimum above its maximum is not an error; filter construction corrects it.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let sizes = &config.sizes;
    check_bounds("sizes", sizes.general())?;
    check_bounds("sizes.movies", sizes.movies)?;
    check_bounds("sizes.episodes", sizes.episodes)?;
    check_bounds("sizes.seasons", sizes.seasons)?;
    Ok(())
}

fn check_bounds(section: &str, bounds: SizeBounds) -> Result<(), ConfigError> {
    for (field, value) in [("min", bounds.min), ("max", bounds.max)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{}.{} must be a non-negative number of GB, got {}",
                section, field, value
            )));
        }
    }
    Ok(())
}

/// Validate source definitions
/// - base_url is not empty
/// - separator is not empty
pub fn validate_definitions(
    definitions: &BTreeMap<String, SourceDefinition>,
) -> Result<(), ConfigError> {
    for (id, def) in definitions {
        if def.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "sources.{}.base_url cannot be empty",
                id
            )));
        }
        if def.separator.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "sources.{}.separator cannot be empty",
                id
            )));
        }
    }
    Ok(())
}
