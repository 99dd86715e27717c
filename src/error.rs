//! Error types for the docbench library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`DocBenchError`] — **Fatal**: the run cannot proceed at all (missing
//!   input file, unsupported output format, artifact directory not
//!   writable). Returned as `Err(DocBenchError)` from the top-level
//!   `compare`/`convert_with` functions.
//!
//! * [`BackendError`] — **Non-fatal inside a comparison**: a single backend
//!   failed (engine not installed, engine crashed, format it cannot
//!   produce) but every other backend is unaffected. The comparison harness
//!   records it in [`crate::report::ConversionResult::error`] so callers can
//!   inspect partial success rather than losing the whole run to one
//!   missing engine.
//!
//! The separation lets callers decide their own tolerance: the comparison
//! harness always recovers backend failures locally, while the
//! single-backend CLI path promotes them to a fatal error and exit code 1.

use crate::config::OutputFormat;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the docbench library.
///
/// Per-backend failures use [`BackendError`] and are stored in
/// [`crate::report::ConversionResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum DocBenchError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Format errors ─────────────────────────────────────────────────────
    /// The requested output format is not in the enumerated set.
    ///
    /// Raised before any backend is attempted.
    #[error("Unsupported output format '{value}'\nValid formats: markdown (md), html, json, text, doctags")]
    UnsupportedFormat { value: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output artifact.
    #[error("Failed to write artifact '{path}': {source}")]
    ArtifactWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Promoted backend errors ───────────────────────────────────────────
    /// A backend failure promoted to fatal.
    ///
    /// Only the single-backend conversion path does this; the comparison
    /// harness never constructs this variant.
    #[error(transparent)]
    Backend(#[from] BackendError),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single conversion backend.
///
/// Stored in [`crate::report::ConversionResult::error`] when a backend
/// fails. The overall comparison continues regardless.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum BackendError {
    /// The external engine behind the backend is not installed or not
    /// reachable.
    #[error("Backend '{backend}' is not available.\n{hint}")]
    Unavailable { backend: String, hint: String },

    /// The engine ran but signalled an error.
    #[error("Backend '{backend}' failed: {detail}")]
    ConversionFailed { backend: String, detail: String },

    /// The backend cannot produce the requested format and has no
    /// reasonable native mapping for it.
    #[error("Backend '{backend}' does not support {format} output")]
    UnsupportedFormat {
        backend: String,
        format: OutputFormat,
    },
}

impl BackendError {
    /// The name of the backend this error belongs to.
    pub fn backend(&self) -> &str {
        match self {
            BackendError::Unavailable { backend, .. }
            | BackendError::ConversionFailed { backend, .. }
            | BackendError::UnsupportedFormat { backend, .. } => backend,
        }
    }
}
