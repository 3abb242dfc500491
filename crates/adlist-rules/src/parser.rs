//! Per-source text parsing: classifier, normalizer and sanitizer
//! composed over one source body.

use crate::classify::classify;
use crate::dialect::DialectTable;
use crate::policy;
use crate::rule::Rule;

/// Parse one source's raw text into rules.
///
/// Pure function over the body: malformed or unrecognized lines are
/// discarded silently, never propagated. Every returned rule carries a
/// blocking policy and its mandatory modifiers.
pub fn parse_rules(table: &DialectTable, text: &str) -> Vec<Rule> {
    let mut rules = Vec::new();
    for raw in text.lines() {
        let Some(tokens) = classify(raw) else {
            continue;
        };
        let Some(mut rule) = table.normalize(&tokens) else {
            tracing::trace!(line = raw.trim(), "discarding unrecognized rule line");
            continue;
        };
        rule.policy = policy::sanitize(&rule.policy);
        policy::apply_mandatory_modifiers(&mut rule);
        rules.push(rule);
    }
    rules
}
