mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str, load_definitions, load_definitions_from_str};
pub use types::*;
pub use validate::{validate_config, validate_definitions};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
