//! `sieve`: run one filter session against recorded listings.
//!
//! Loads the configuration (`SIEVE_CONFIG`, default `sieve.toml`) and the
//! source definitions it points to, expands the source's queries for the
//! given media, feeds each query the recorded listings, and prints the
//! deduplicated, ranked results as JSON on stdout. Logs, and the metrics
//! when `--metrics` is given, go to stderr.

mod args;
mod metrics;
mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sieve_core::{
    apply_filters, load_config, load_definitions, validate_config, validate_definitions,
    FilterSession, MediaInfo,
};

use args::Args;
use replay::Replay;

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize logging; SIEVE_LOG_FORMAT=json switches to JSON lines
    let json_logs = std::env::var("SIEVE_LOG_FORMAT").is_ok_and(|f| f == "json");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let args = Args::parse();
    Lazy::force(&metrics::REGISTRY);

    // Determine config path
    let config_path = std::env::var("SIEVE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("sieve.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    let definitions_path = resolve_relative(&config_path, &config.sources.definitions);
    let definitions = load_definitions(&definitions_path).with_context(|| {
        format!("Failed to load source definitions from {:?}", definitions_path)
    })?;
    validate_definitions(&definitions).context("Source definition validation failed")?;

    let definition = definitions
        .get(&args.source_id)
        .cloned()
        .with_context(|| format!("Unknown source {:?}", args.source_id))?;

    let media: MediaInfo = read_json(&args.media)?;
    let replay: Replay = read_json(&args.listings)?;

    let mut session = FilterSession::from_config(&args.source_id, definition, &config);
    session.use_category(args.category, &media, &config.sizes);

    let mut fetcher = replay.into_fetcher();
    let accepted = session.run(&mut fetcher, args.verify_options());
    let results = apply_filters(accepted, &config.ranking);
    info!(
        source = %args.source_id,
        results = results.len(),
        "Filtering complete"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&results).context("Failed to serialize results")?
    );

    if args.metrics {
        eprint!("{}", metrics::encode_metrics()?);
    }
    Ok(())
}

/// Resolve `path` against the directory holding `config_path`.
fn resolve_relative(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    config_path
        .parent()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))
}
