//! Dialect normalization: maps source rule-type vocabularies onto the
//! canonical type set and extracts target, policy and qualifiers.

use std::collections::HashMap;

use crate::policy::{self, DEFAULT_POLICY};
use crate::rule::{Rule, RuleType};

/// Qualifier tokens that may appear in the policy position but are not
/// policies. `no-resolve` is preserved as a modifier on address-range
/// rules; on other types qualifiers are dropped (the canonical output
/// dialect has no use for them there).
const QUALIFIERS: [&str; 2] = ["no-resolve", "extended-matching"];

/// Immutable lookup table from external type spellings to canonical
/// rule types.
///
/// Built once at startup and injected into parsing; extended by adding
/// entries, never by branching on source identity.
#[derive(Debug)]
pub struct DialectTable {
    map: HashMap<&'static str, RuleType>,
}

impl DialectTable {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        // Canonical spellings.
        map.insert("HOST", RuleType::Host);
        map.insert("HOST-SUFFIX", RuleType::HostSuffix);
        map.insert("HOST-KEYWORD", RuleType::HostKeyword);
        map.insert("HOST-WILDCARD", RuleType::HostWildcard);
        map.insert("IP-CIDR", RuleType::IpCidr);
        map.insert("IP-CIDR6", RuleType::IpCidr6);
        map.insert("USER-AGENT", RuleType::UserAgent);
        map.insert("GEOIP", RuleType::GeoIp);
        map.insert("IP-ASN", RuleType::IpAsn);
        // Synonyms from other proxy-rule ecosystems.
        map.insert("DOMAIN", RuleType::Host);
        map.insert("DOMAIN-SUFFIX", RuleType::HostSuffix);
        map.insert("DOMAIN-KEYWORD", RuleType::HostKeyword);
        map.insert("DOMAIN-WILDCARD", RuleType::HostWildcard);
        map.insert("IP6-CIDR", RuleType::IpCidr6);
        Self { map }
    }

    /// Look up an external type token (case-insensitive).
    pub fn lookup(&self, token: &str) -> Option<RuleType> {
        self.map.get(token.to_ascii_uppercase().as_str()).copied()
    }

    /// Normalize classified tokens into a rule, or discard.
    ///
    /// Unknown type tokens cause discard; this is the primary filter
    /// against non-blocking rule kinds (PROCESS-NAME, routing rules and
    /// the like). Two-token lines are valid; the policy falls back to
    /// the blocking default. The returned policy is the raw candidate —
    /// the caller runs the sanitizer over it.
    pub fn normalize(&self, tokens: &[String]) -> Option<Rule> {
        let rule_type = self.lookup(tokens.first()?)?;

        let target = strip_quotes(tokens.get(1)?.trim()).to_string();
        if target.is_empty() {
            return None;
        }

        let mut modifiers = Vec::new();
        let mut candidate: Option<&str> = None;
        for token in tokens.iter().skip(2) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if is_qualifier(token) {
                if rule_type.is_address_range() && token.eq_ignore_ascii_case(policy::NO_RESOLVE) {
                    modifiers.push(policy::NO_RESOLVE.to_string());
                }
                continue;
            }
            // Only the first non-qualifier token is the policy; any
            // further trailing fields are noise.
            if candidate.is_none() {
                candidate = Some(token);
            }
        }

        Some(Rule {
            rule_type,
            target,
            policy: candidate.unwrap_or(DEFAULT_POLICY).to_string(),
            modifiers,
        })
    }
}

impl Default for DialectTable {
    fn default() -> Self {
        Self::new()
    }
}

fn is_qualifier(token: &str) -> bool {
    QUALIFIERS.iter().any(|q| token.eq_ignore_ascii_case(q))
}

fn strip_quotes(token: &str) -> &str {
    let token = token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token);
    token
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(token)
}
