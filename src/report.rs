//! Per-run result types and the bounded console preview.
//!
//! One [`ConversionResult`] per backend, write-once, never read until all
//! invocations settle — the harness collects them into a
//! [`ComparisonOutput`] together with the artifact paths and run stats.
//! Everything here serialises so the CLI's `--json` flag can dump the
//! whole report.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The outcome of one backend's conversion attempt.
///
/// Exactly one of a non-empty `content` or an `error` is meaningful. Both
/// may be empty when the backend produced no output without failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Stable backend name (also the artifact file-name component).
    pub backend: String,
    /// Normalised output; empty on failure or empty engine output.
    pub content: String,
    /// Failure description when the backend did not produce output.
    pub error: Option<String>,
    /// Wall-clock time the backend took, including probe and subprocess.
    pub duration_ms: u64,
}

impl ConversionResult {
    /// Whether this result carries content worth persisting.
    pub fn has_content(&self) -> bool {
        self.error.is_none() && !self.content.is_empty()
    }
}

/// Aggregate counters for one comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Backends registered for the run.
    pub total_backends: usize,
    /// Backends that produced a persisted artifact.
    pub succeeded: usize,
    /// Backends that recorded an error.
    pub failed: usize,
    /// Wall-clock duration of the whole run.
    pub total_duration_ms: u64,
}

/// Everything a comparison run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    /// One result per registered backend, ordered by backend name.
    pub results: Vec<ConversionResult>,
    /// Artifacts written, parallel to the successful results.
    pub artifacts: Vec<PathBuf>,
    /// Aggregate counters.
    pub stats: RunStats,
}

impl ComparisonOutput {
    /// The result for a given backend name, if it was registered.
    pub fn result_for(&self, backend: &str) -> Option<&ConversionResult> {
        self.results.iter().find(|r| r.backend == backend)
    }
}

/// Render a bounded preview of normalised content.
///
/// First `limit` characters, with embedded newlines turned into indented
/// continuation lines and a trailing ellipsis when the content was
/// truncated. Truncation counts characters, never splitting a code point.
pub fn preview(content: &str, limit: usize) -> String {
    let truncated: String = content.chars().take(limit).collect();
    let mut out = truncated.replace('\n', "\n  ");
    if content.chars().count() > limit {
        out.push_str("...");
    }
    out
}
