//! Merge engine: concurrent fetch+parse per source, deterministic
//! priority-ordered dedup.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::dialect::DialectTable;
use crate::error::RulesError;
use crate::parser::parse_rules;
use crate::provider::Fetch;
use crate::rule::{DedupKey, Rule};

/// One upstream rule list. Priority is the position in the configured
/// source list; lower rank wins conflicts. Identity comes from the
/// explicit `name`, never from the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub name: String,
}

/// Rules contributed by one source after dedup (0 for failed sources).
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub name: String,
    pub count: usize,
}

/// Per-source contribution counts in priority order, plus the total.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub sources: Vec<SourceReport>,
    pub total: usize,
}

/// Merge tuning knobs.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Maximum concurrent fetch+parse tasks.
    pub concurrency: usize,
    /// Minimum acceptable aggregate rule count; below this the merge is
    /// fatal so a transient widespread source failure cannot wipe a
    /// previously good output.
    pub min_rules: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            min_rules: 1,
        }
    }
}

/// The merged rule list (insertion order = priority order of the
/// winning source) and its report.
#[derive(Debug)]
pub struct MergeOutcome {
    pub rules: Vec<Rule>,
    pub report: MergeReport,
}

/// Fetch and parse every source concurrently, then merge sequentially
/// in priority order.
///
/// Each source runs as its own task under a bounded semaphore and
/// parses into a private rule list; nothing shared is touched until the
/// join barrier. Slots are then applied strictly in rank order, so the
/// first source to claim a dedup key wins regardless of network timing.
/// A source that fails to fetch (or whose task panics) contributes zero
/// rules and never aborts its siblings.
pub async fn merge_sources(
    sources: &[Source],
    fetcher: Arc<dyn Fetch>,
    table: Arc<DialectTable>,
    opts: &MergeOptions,
) -> Result<MergeOutcome, RulesError> {
    let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));

    let mut tasks = Vec::with_capacity(sources.len());
    for source in sources {
        let semaphore = semaphore.clone();
        let fetcher = fetcher.clone();
        let table = table.clone();
        let source = source.clone();
        tasks.push(tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails
            // on shutdown; running unthrottled then is harmless.
            let _permit = semaphore.acquire_owned().await.ok();
            match fetcher.fetch(&source.url).await {
                Ok(body) => {
                    let rules = parse_rules(&table, &body);
                    debug!(source = %source.name, parsed = rules.len(), "source parsed");
                    rules
                }
                Err(e) => {
                    warn!(source = %source.name, error = %e, "fetch failed, contributing zero rules");
                    Vec::new()
                }
            }
        }));
    }

    // Join barrier: buffer every source's parsed list into its
    // rank-indexed slot before touching the shared rule set.
    let mut slots: Vec<Vec<Rule>> = Vec::with_capacity(tasks.len());
    for (task, source) in tasks.into_iter().zip(sources) {
        match task.await {
            Ok(rules) => slots.push(rules),
            Err(e) => {
                warn!(source = %source.name, error = %e, "source task failed, contributing zero rules");
                slots.push(Vec::new());
            }
        }
    }

    // Sequential merge in rank order: first writer for a key wins,
    // later writers are silently dropped.
    let mut seen: HashSet<DedupKey> = HashSet::new();
    let mut rules = Vec::new();
    let mut reports = Vec::with_capacity(sources.len());
    for (slot, source) in slots.into_iter().zip(sources) {
        let mut count = 0;
        for rule in slot {
            if seen.insert(rule.dedup_key()) {
                rules.push(rule);
                count += 1;
            }
        }
        reports.push(SourceReport {
            name: source.name.clone(),
            count,
        });
    }

    let total = rules.len();
    if total == 0 {
        return Err(RulesError::EmptyMerge);
    }
    if total < opts.min_rules {
        return Err(RulesError::BelowThreshold {
            got: total,
            min: opts.min_rules,
        });
    }

    info!(total, sources = sources.len(), "merge complete");
    Ok(MergeOutcome {
        rules,
        report: MergeReport {
            sources: reports,
            total,
        },
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    /// In-memory fetch double; optional per-URL delay to exercise
    /// completion-order independence.
    struct StubFetch {
        bodies: HashMap<String, String>,
        delays: HashMap<String, Duration>,
    }

    impl StubFetch {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                bodies: entries
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
                delays: HashMap::new(),
            }
        }

        fn with_delay(mut self, url: &str, delay: Duration) -> Self {
            self.delays.insert(url.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl Fetch for StubFetch {
        async fn fetch(&self, url: &str) -> Result<String, RulesError> {
            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            }
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| RulesError::Http(format!("HTTP 404 for {url}")))
        }
    }

    fn sources(names: &[&str]) -> Vec<Source> {
        names
            .iter()
            .map(|n| Source {
                url: format!("https://example.com/{n}.list"),
                name: n.to_string(),
            })
            .collect()
    }

    async fn merge(
        srcs: &[Source],
        fetch: StubFetch,
        opts: &MergeOptions,
    ) -> Result<MergeOutcome, RulesError> {
        merge_sources(
            srcs,
            Arc::new(fetch),
            Arc::new(DialectTable::new()),
            opts,
        )
        .await
    }

    #[tokio::test]
    async fn first_source_wins_dedup_key() {
        let srcs = sources(&["primary", "secondary"]);
        let fetch = StubFetch::new(&[
            (
                "https://example.com/primary.list",
                "HOST,ads.example.com,reject-dict\n",
            ),
            (
                "https://example.com/secondary.list",
                "HOST,ADS.EXAMPLE.COM,reject\nHOST,other.example.com,reject\n",
            ),
        ]);
        let outcome = merge(&srcs, fetch, &MergeOptions::default()).await.unwrap();
        assert_eq!(outcome.rules.len(), 2);
        assert_eq!(outcome.rules[0].policy, "reject-dict");
        assert_eq!(outcome.report.sources[0].count, 1);
        assert_eq!(outcome.report.sources[1].count, 1);
    }

    #[tokio::test]
    async fn priority_independent_of_completion_order() {
        let srcs = sources(&["slow-primary", "fast-secondary"]);
        let fetch = StubFetch::new(&[
            (
                "https://example.com/slow-primary.list",
                "HOST,ads.example.com,reject-200\n",
            ),
            (
                "https://example.com/fast-secondary.list",
                "HOST,ads.example.com,reject\n",
            ),
        ])
        .with_delay(
            "https://example.com/slow-primary.list",
            Duration::from_millis(50),
        );
        let outcome = merge(&srcs, fetch, &MergeOptions::default()).await.unwrap();
        assert_eq!(outcome.rules.len(), 1);
        // The slow source still wins: it ranks first.
        assert_eq!(outcome.rules[0].policy, "reject-200");
        assert_eq!(outcome.report.sources[0].count, 1);
        assert_eq!(outcome.report.sources[1].count, 0);
    }

    #[tokio::test]
    async fn failed_source_contributes_zero_rules() {
        let srcs = sources(&["dead", "alive"]);
        let fetch = StubFetch::new(&[(
            "https://example.com/alive.list",
            "HOST,ads.example.com,reject\n",
        )]);
        let outcome = merge(&srcs, fetch, &MergeOptions::default()).await.unwrap();
        assert_eq!(outcome.report.sources[0].count, 0);
        assert_eq!(outcome.report.sources[1].count, 1);
        assert_eq!(outcome.report.total, 1);
    }

    #[tokio::test]
    async fn all_sources_failing_is_fatal() {
        let srcs = sources(&["a", "b"]);
        let fetch = StubFetch::new(&[]);
        let err = merge(&srcs, fetch, &MergeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RulesError::EmptyMerge));
    }

    #[tokio::test]
    async fn below_threshold_is_fatal() {
        let srcs = sources(&["only"]);
        let fetch = StubFetch::new(&[(
            "https://example.com/only.list",
            "HOST,ads.example.com,reject\n",
        )]);
        let opts = MergeOptions {
            concurrency: 2,
            min_rules: 10,
        };
        let err = merge(&srcs, fetch, &opts).await.unwrap_err();
        assert!(matches!(
            err,
            RulesError::BelowThreshold { got: 1, min: 10 }
        ));
    }

    #[tokio::test]
    async fn no_two_output_rules_share_a_dedup_key() {
        let srcs = sources(&["a", "b", "c"]);
        let body = "HOST,x.example.com,reject\nHOST-SUFFIX,x.example.com,reject\n";
        let fetch = StubFetch::new(&[
            ("https://example.com/a.list", body),
            ("https://example.com/b.list", body),
            ("https://example.com/c.list", body),
        ]);
        let outcome = merge(&srcs, fetch, &MergeOptions::default()).await.unwrap();
        let mut keys = HashSet::new();
        for rule in &outcome.rules {
            assert!(keys.insert(rule.dedup_key()));
        }
        // Same target under different types is two distinct rules.
        assert_eq!(outcome.rules.len(), 2);
        assert_eq!(outcome.report.sources[0].count, 2);
        assert_eq!(outcome.report.sources[1].count, 0);
    }
}
