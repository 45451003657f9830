//! Listing verification.
//!
//! A [`FilterSession`] walks a source's queries for one media category and
//! runs every returned listing through [`verify`]: name normalization,
//! whole-word title matching, the keyword policy from [`FilterConfig`] and
//! the size window.

mod config;
mod matcher;
mod normalize;
mod quality;
mod session;
mod size;
mod verify;

pub use config::{FilterConfig, SizeRange, BYTES_PER_GB};
pub use matcher::{included, WILDCARD};
pub use normalize::{apply_aliases, fold_unicode, normalize};
pub use quality::QualityTag;
pub use session::{FilterSession, VerifyOptions};
pub use size::parse_size;
pub use verify::{verify, RejectReason, TitleSource, Verdict};
