//! Backtick-quoted column reference extraction
//!
//! Purely lexical: backticks are paired left to right and the text between
//! each pair is taken verbatim. String literals and comments are not special.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// One backtick pair; `[^`]*` keeps pairing non-nested and leftmost
static BACKTICK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());

/// Return the set of column identifiers an expression references.
///
/// An unmatched trailing backtick is ignored, and an empty pair yields nothing.
pub fn extract_columns(expression: &str) -> BTreeSet<String> {
    BACKTICK_RE
        .captures_iter(expression)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
