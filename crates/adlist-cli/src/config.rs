//! Merge job configuration types and defaults.

use std::path::PathBuf;

use adlist_rules::Source;
use serde::Deserialize;

/// Static configuration for one merge run.
///
/// Sources are ordered: list position is the priority rank, and the
/// first source to emit a dedup key wins conflicts.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Title rendered on the output header.
    #[serde(default = "default_title")]
    pub title: String,

    /// Output file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Maximum concurrent fetch+parse tasks.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request fetch timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum acceptable aggregate rule count; a merge below this
    /// exits non-zero and leaves the previous output untouched.
    #[serde(default = "default_min_rules")]
    pub min_rules: usize,

    /// Upstream lists in priority order.
    #[serde(default = "default_sources")]
    pub sources: Vec<Source>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            min_rules: default_min_rules(),
            sources: default_sources(),
        }
    }
}

fn default_title() -> String {
    "Merged AdBlock Rules".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("merged_ads.list")
}

fn default_concurrency() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_min_rules() -> usize {
    1
}

/// Built-in source list, highest priority first, so the binary is
/// usable without a config file.
fn default_sources() -> Vec<Source> {
    let entries = [
        (
            "AWAvenue",
            "https://raw.githubusercontent.com/TG-Twilight/AWAvenue-Ads-Rule/main/Filters/AWAvenue-Ads-Rule-QuantumultX.list",
        ),
        (
            "amiglistimo",
            "https://raw.githubusercontent.com/amiglistimo/Quantumult-X/main/Rewrite/ADBlock.list",
        ),
        (
            "fmz200",
            "https://raw.githubusercontent.com/fmz200/wool_scripts/main/QuantumultX/filter/filter.list",
        ),
        (
            "zirawell",
            "https://raw.githubusercontent.com/zirawell/R-Store/main/Rule/QuanX/Adblock/All/filter/allAdBlock.list",
        ),
        ("limbopro", "https://limbopro.com/Adblock4limbo.list"),
    ];
    entries
        .iter()
        .map(|(name, url)| Source {
            url: url.to_string(),
            name: name.to_string(),
        })
        .collect()
}
