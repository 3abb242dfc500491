//! CLI entry point for the merge subcommand.
//!
//! This module provides the command-line interface that can be used
//! either directly or as a subcommand of the main adlist CLI.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adlist_rules::HttpFetcher;

use crate::config::AppConfig;
use crate::loader::load_config;
use crate::runner::run_merge;
use crate::validate::validate_config;

/// Merge subcommand arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "adlist-merge",
    version,
    about = "Fetch, normalize and merge ad-blocking rule lists"
)]
pub struct MergeArgs {
    /// Config file path (json/jsonc/yaml/toml); built-in defaults when
    /// omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path override.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level override (e.g. "info", "debug", "trace").
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Run the merge with the given CLI arguments.
pub async fn run(args: MergeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .map_err(|e| format!("failed to load config file {:?}: {e}", path))?,
        None => AppConfig::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }
    validate_config(&config)?;

    init_tracing(args.log_level.as_deref().unwrap_or("info"));

    info!(
        sources = config.sources.len(),
        output = %config.output.display(),
        "adlist merge starting"
    );

    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(config.timeout_secs))?);
    let summary = run_merge(&config, fetcher).await?;

    info!(
        total = summary.total,
        delta = %summary.delta,
        "merge finished"
    );
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
