//! Line classification: comment stripping and tokenization.
//!
//! Turns one raw source line into candidate tokens, or rejects it as
//! noise. Structural markers from every dialect the aggregator consumes
//! are rejected here so the normalizer only ever sees rule-shaped input.

/// Comment markers stripped from the first occurrence onward.
const COMMENT_MARKERS: [&str; 3] = ["#", ";", "//"];

/// Classify a raw line into trimmed tokens, or `None` for noise.
///
/// Tokenization is dual-mode: lines containing a comma are split on
/// commas with each token trimmed (so `HOST, example.com, reject`
/// yields the same tokens as the spacing-free form); all other lines
/// are split on whitespace. A leading YAML list bullet (`- `) is
/// dropped so flat reads of provider YAML still tokenize.
pub fn classify(raw: &str) -> Option<Vec<String>> {
    let line = strip_comment(raw).trim();
    if line.is_empty() {
        return None;
    }

    // Section headers, markup, Adblock-style comments, and the YAML
    // payload marker are not rules.
    if line.starts_with(['[', '<', '!']) {
        return None;
    }
    if line
        .get(..8)
        .is_some_and(|head| head.eq_ignore_ascii_case("payload:"))
    {
        return None;
    }

    // A YAML bullet carried into a flat read acts as a null first
    // token; the real type token follows it.
    let line = match line.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    };

    let tokens: Vec<String> = if line.contains(',') {
        line.split(',').map(|t| t.trim().to_string()).collect()
    } else {
        line.split_whitespace().map(str::to_string).collect()
    };

    if tokens.len() < 2 {
        return None;
    }

    // Logical combinator rules (AND/OR/NOT groups) are structural, not
    // single-target rules.
    let head = tokens[0].to_ascii_uppercase();
    if matches!(head.as_str(), "AND" | "OR" | "NOT") {
        return None;
    }

    Some(tokens)
}

fn strip_comment(line: &str) -> &str {
    let mut cut = line.len();
    for marker in COMMENT_MARKERS {
        if let Some(idx) = line.find(marker) {
            cut = cut.min(idx);
        }
    }
    &line[..cut]
}
