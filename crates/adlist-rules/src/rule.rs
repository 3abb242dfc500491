//! Canonical rule and dedup-key definitions.

use std::fmt;

/// The closed set of rule types the engine emits.
///
/// Every dialect spelling accepted by the normalizer maps onto exactly
/// one of these; anything else is discarded during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    Host,
    HostSuffix,
    HostKeyword,
    HostWildcard,
    IpCidr,
    IpCidr6,
    UserAgent,
    GeoIp,
    IpAsn,
}

impl RuleType {
    /// The spelling used in rendered output.
    pub fn canonical_name(self) -> &'static str {
        match self {
            RuleType::Host => "HOST",
            RuleType::HostSuffix => "HOST-SUFFIX",
            RuleType::HostKeyword => "HOST-KEYWORD",
            RuleType::HostWildcard => "HOST-WILDCARD",
            RuleType::IpCidr => "IP-CIDR",
            RuleType::IpCidr6 => "IP-CIDR6",
            RuleType::UserAgent => "USER-AGENT",
            RuleType::GeoIp => "GEOIP",
            RuleType::IpAsn => "IP-ASN",
        }
    }

    /// Fixed output-ordering rank by matching cost: exact host lookups
    /// first, then substring/wildcard forms, then address-range lookups.
    pub fn match_cost(self) -> u8 {
        match self {
            RuleType::Host => 0,
            RuleType::HostSuffix => 1,
            RuleType::HostKeyword => 2,
            RuleType::HostWildcard => 3,
            RuleType::UserAgent => 4,
            RuleType::IpCidr => 5,
            RuleType::IpCidr6 => 6,
            RuleType::GeoIp => 7,
            RuleType::IpAsn => 8,
        }
    }

    /// Address-range types must always carry the `no-resolve` modifier.
    pub fn is_address_range(self) -> bool {
        matches!(self, RuleType::IpCidr | RuleType::IpCidr6)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// One normalized rule.
///
/// The target is opaque to the engine beyond trimming and quote
/// stripping; the policy always denotes blocking intent after the
/// sanitizer has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub rule_type: RuleType,
    pub target: String,
    pub policy: String,
    pub modifiers: Vec<String>,
}

impl Rule {
    /// Cross-source identity: type plus case-folded target.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            rule_type: self.rule_type,
            target: self.target.to_ascii_lowercase(),
        }
    }

    /// Render as one output line: `TYPE,target,policy[,modifier...]`.
    pub fn render(&self) -> String {
        let mut line = format!(
            "{},{},{}",
            self.rule_type.canonical_name(),
            self.target,
            self.policy
        );
        for modifier in &self.modifiers {
            line.push(',');
            line.push_str(modifier);
        }
        line
    }
}

/// Identity used for cross-source duplicate detection.
///
/// Two rules with the same key are the same logical rule regardless of
/// target letter case or source-specific policy spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub rule_type: RuleType,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_out() {
        assert_eq!(RuleType::Host.canonical_name(), "HOST");
        assert_eq!(RuleType::HostSuffix.canonical_name(), "HOST-SUFFIX");
        assert_eq!(RuleType::IpCidr6.canonical_name(), "IP-CIDR6");
        assert_eq!(RuleType::IpAsn.canonical_name(), "IP-ASN");
    }

    #[test]
    fn match_cost_orders_host_before_wildcard_before_address() {
        assert!(RuleType::Host.match_cost() < RuleType::HostSuffix.match_cost());
        assert!(RuleType::HostKeyword.match_cost() < RuleType::HostWildcard.match_cost());
        assert!(RuleType::HostWildcard.match_cost() < RuleType::UserAgent.match_cost());
        assert!(RuleType::UserAgent.match_cost() < RuleType::IpCidr.match_cost());
        assert!(RuleType::IpCidr6.match_cost() < RuleType::GeoIp.match_cost());
        assert!(RuleType::GeoIp.match_cost() < RuleType::IpAsn.match_cost());
    }

    #[test]
    fn dedup_key_folds_target_case() {
        let a = Rule {
            rule_type: RuleType::Host,
            target: "Ads.Example.COM".to_string(),
            policy: "reject".to_string(),
            modifiers: vec![],
        };
        let b = Rule {
            rule_type: RuleType::Host,
            target: "ads.example.com".to_string(),
            policy: "reject-200".to_string(),
            modifiers: vec![],
        };
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_distinguishes_types() {
        let host = Rule {
            rule_type: RuleType::Host,
            target: "example.com".to_string(),
            policy: "reject".to_string(),
            modifiers: vec![],
        };
        let suffix = Rule {
            rule_type: RuleType::HostSuffix,
            ..host.clone()
        };
        assert_ne!(host.dedup_key(), suffix.dedup_key());
    }

    #[test]
    fn render_includes_modifiers_in_order() {
        let rule = Rule {
            rule_type: RuleType::IpCidr,
            target: "10.0.0.0/8".to_string(),
            policy: "reject".to_string(),
            modifiers: vec!["no-resolve".to_string()],
        };
        assert_eq!(rule.render(), "IP-CIDR,10.0.0.0/8,reject,no-resolve");
    }
}
