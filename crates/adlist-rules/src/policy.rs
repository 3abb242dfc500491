//! Policy sanitization.
//!
//! Every emitted rule must carry a blocking policy: the merged document
//! exists only to block, so a maintainer's local `direct`/`proxy`
//! override is never allowed through.

use crate::rule::Rule;

/// The plain blocking default, used when a line omits its policy or
/// carries a non-blocking one.
pub const DEFAULT_POLICY: &str = "reject";

/// Substring marking the reject family of policies (`reject`,
/// `reject-200`, `reject-dict`, `reject-no-drop`, ...).
pub const BLOCKING_MARKER: &str = "reject";

/// Modifier preventing DNS resolution side effects on address-range
/// rules.
pub const NO_RESOLVE: &str = "no-resolve";

/// Normalize a candidate policy to a blocking one.
///
/// Blocking policies are lowercased and kept, parameterized forms
/// included; anything else is coerced to the plain default.
pub fn sanitize(candidate: &str) -> String {
    let lowered = candidate.trim().to_ascii_lowercase();
    if lowered.contains(BLOCKING_MARKER) {
        lowered
    } else {
        DEFAULT_POLICY.to_string()
    }
}

/// Attach type-dependent mandatory modifiers.
///
/// Address-range rules always carry `no-resolve` exactly once; it is
/// appended unconditionally rather than inferred from input.
pub fn apply_mandatory_modifiers(rule: &mut Rule) {
    if rule.rule_type.is_address_range() && !rule.modifiers.iter().any(|m| m == NO_RESOLVE) {
        rule.modifiers.push(NO_RESOLVE.to_string());
    }
}
