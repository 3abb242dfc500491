//! Output assembly: cost-aware ordering, delta against the previous
//! output, header rendering and atomic writes.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};

use crate::merge::MergeReport;
use crate::rule::Rule;

/// Header timestamps use a fixed UTC+8 offset (no DST), so output is
/// reproducible regardless of the host time zone.
const HEADER_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Current header timestamp in the fixed output time zone.
pub fn header_now() -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(HEADER_UTC_OFFSET_SECS) {
        Some(offset) => Utc::now().with_timezone(&offset),
        // Unreachable for an in-range constant; fall back to UTC.
        None => Utc::now().fixed_offset(),
    }
}

/// Sort rules by matching cost, ties broken by target ascending.
///
/// The cost ranking is the fixed total order over rule types defined by
/// `RuleType::match_cost`; the sort is stable so equal keys keep their
/// merge order.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        a.rule_type
            .match_cost()
            .cmp(&b.rule_type.match_cost())
            .then_with(|| a.target.cmp(&b.target))
    });
}

/// Count rule lines in a previous output, ignoring the header and any
/// comment or blank lines.
pub fn previous_rule_count(text: &str) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .count()
}

/// Signed difference against the previous output, or `Init` when no
/// previous output exists.
pub fn format_delta(previous: Option<usize>, total: usize) -> String {
    match previous {
        None => "Init".to_string(),
        Some(prev) => {
            let delta = total as i64 - prev as i64;
            if delta > 0 {
                format!("+{delta}")
            } else {
                delta.to_string()
            }
        }
    }
}

/// Render the final document: provenance header then one rule per line,
/// with a trailing newline.
///
/// Per-source counts are ordered by descending contribution, name
/// ascending on ties, so the header is deterministic.
pub fn render(
    rules: &[Rule],
    report: &MergeReport,
    title: &str,
    delta: &str,
    now: DateTime<FixedOffset>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}");
    let _ = writeln!(out, "# Updated: {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "# Total: {} ({delta})", report.total);

    let mut by_contribution = report.sources.clone();
    by_contribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    for source in &by_contribution {
        let _ = writeln!(out, "# {}: {}", source.name, source.count);
    }
    let _ = writeln!(out, "#");

    for rule in rules {
        let _ = writeln!(out, "{}", rule.render());
    }
    out
}

/// Write the document atomically (write-to-temp + rename).
///
/// This prevents a truncated output file if the process is killed
/// mid-write. On Windows, the destination is removed first since
/// `rename` fails when the target already exists.
pub async fn write_atomic(path: &Path, content: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, content).await?;
    #[cfg(target_os = "windows")]
    {
        let _ = tokio::fs::remove_file(path).await;
    }
    tokio::fs::rename(&tmp_path, path).await
}
