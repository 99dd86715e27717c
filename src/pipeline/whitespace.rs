//! Whitespace normaliser: at most one blank line between content blocks.
//!
//! Collapses any run of three or more consecutive newline characters to
//! exactly two, then strips leading and trailing whitespace from the whole
//! document. Idempotent: applying it twice yields the same result as once.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse excess blank lines and trim the document.
pub fn normalize_whitespace(input: &str) -> String {
    RE_BLANK_RUNS.replace_all(input, "\n\n").trim().to_string()
}
