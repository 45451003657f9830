//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use sieve_core::{MediaCategory, VerifyOptions};

/// Filter, dedup and rank recorded torrent listings for one source.
///
/// Configuration is read from `SIEVE_CONFIG` (default `sieve.toml`).
#[derive(Debug, Parser)]
#[command(name = "sieve")]
#[command(about = "Filter, dedup and rank recorded torrent listings for one source")]
pub struct Args {
    /// Source id in the definitions file
    pub source_id: String,

    /// Media category: general, movie, episode, season or anime
    #[arg(value_parser = MediaCategory::from_str)]
    pub category: MediaCategory,

    /// JSON file with the media metadata (title, year, season, episode, ...)
    pub media: PathBuf,

    /// JSON file with recorded listings: one array for every query, or an
    /// object keyed by expanded query
    pub listings: PathBuf,

    /// Verify the searched title instead of each listing name
    #[arg(long)]
    pub skip_name: bool,

    /// Skip the size check
    #[arg(long)]
    pub skip_size: bool,

    /// Print Prometheus metrics to stderr when done
    #[arg(long)]
    pub metrics: bool,
}

impl Args {
    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            verify_name: !self.skip_name,
            verify_size: !self.skip_size,
        }
    }
}
