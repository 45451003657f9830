//! Query templates.
//!
//! Source definitions carry keyword templates such as
//! `"{title} S{season:2}E{episode:2}"`. This module selects the templates for
//! a media category and expands their placeholders against media metadata.

mod definition;
mod expand;
mod remap;
mod types;

pub use definition::{CategoryTemplate, SourceDefinition};
pub use expand::{build_queries, expand};
pub use remap::{t411_episode, t411_season};
pub use types::*;
