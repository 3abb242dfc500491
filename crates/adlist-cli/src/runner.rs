//! The merge pipeline: fetch, merge, sort, render, write.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use adlist_rules::{merge_sources, output, DialectTable, Fetch, MergeOptions, RulesError};

use crate::config::AppConfig;

/// What a successful run produced, for logging and tests.
#[derive(Debug)]
pub struct MergeSummary {
    pub total: usize,
    pub delta: String,
    pub output: PathBuf,
}

/// Run one merge: fetch all sources, merge in priority order, sort,
/// render and atomically replace the output file.
///
/// On a fatal merge outcome (zero rules, or below `min_rules`) this
/// returns the error before any write, leaving the previous output
/// byte-for-byte untouched.
pub async fn run_merge(
    config: &AppConfig,
    fetcher: Arc<dyn Fetch>,
) -> Result<MergeSummary, RulesError> {
    let table = Arc::new(DialectTable::new());
    let opts = MergeOptions {
        concurrency: config.concurrency,
        min_rules: config.min_rules,
    };

    let outcome = merge_sources(&config.sources, fetcher, table, &opts).await?;

    let mut rules = outcome.rules;
    output::sort_rules(&mut rules);

    // Previous output is read-only input for the delta; absence means
    // this is the initial run.
    let previous = match tokio::fs::read_to_string(&config.output).await {
        Ok(text) => Some(output::previous_rule_count(&text)),
        Err(_) => None,
    };
    let delta = output::format_delta(previous, outcome.report.total);

    let document = output::render(
        &rules,
        &outcome.report,
        &config.title,
        &delta,
        output::header_now(),
    );
    output::write_atomic(&config.output, &document).await?;

    info!(
        total = outcome.report.total,
        delta = %delta,
        path = %config.output.display(),
        "rule list written"
    );

    Ok(MergeSummary {
        total: outcome.report.total,
        delta,
        output: config.output.clone(),
    })
}
