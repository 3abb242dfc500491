//! Rule-list normalization and merge engine for adlist.
//!
//! Aggregates ad-blocking rule lists published in heterogeneous
//! dialects into one de-duplicated, priority-ordered document.
//!
//! # Architecture
//!
//! - **Classifier**: strips comments/noise and tokenizes candidate lines
//! - **Normalizer**: `DialectTable` maps every accepted type spelling
//!   onto the canonical `RuleType` set
//! - **Sanitizer**: coerces every policy to the reject family and
//!   attaches mandatory modifiers
//! - **Merge engine**: concurrent fetch+parse per source, then a
//!   deterministic priority-ordered dedup behind a join barrier
//! - **Output assembler**: cost-aware sort, delta against the previous
//!   output, provenance header
//!
//! # Example
//!
//! ```
//! use adlist_rules::{DialectTable, parse_rules};
//!
//! let table = DialectTable::new();
//! let rules = parse_rules(&table, "DOMAIN,ads.example.com\nIP-CIDR,10.0.0.0/8,reject\n");
//! assert_eq!(rules[0].render(), "HOST,ads.example.com,reject");
//! assert_eq!(rules[1].render(), "IP-CIDR,10.0.0.0/8,reject,no-resolve");
//! ```

pub mod classify;
pub mod dialect;
pub mod error;
pub mod merge;
pub mod output;
pub mod parser;
pub mod policy;
pub mod provider;
pub mod rule;

pub use dialect::DialectTable;
pub use error::RulesError;
pub use merge::{merge_sources, MergeOptions, MergeOutcome, MergeReport, Source, SourceReport};
pub use parser::parse_rules;
pub use provider::{Fetch, HttpFetcher};
pub use rule::{DedupKey, Rule, RuleType};
