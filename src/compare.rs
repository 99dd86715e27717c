//! The comparison harness: run every registered backend against one input
//! and persist a normalised artifact per backend.
//!
//! ## Isolation contract
//!
//! Backends are invoked independently; a failure in one must not abort or
//! affect any other backend's attempt. Each backend gets exactly one
//! [`ConversionResult`] — write-once, collected only after all invocations
//! settle — and writes to its own artifact path, so no shared mutable
//! state needs locking and relative execution order cannot change the
//! final artifact set.

use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::config::RunConfig;
use crate::error::DocBenchError;
use crate::input;
use crate::pipeline;
use crate::report::{ComparisonOutput, ConversionResult, RunStats};

/// Compare all registered backends on one input document.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_str` — Local file path or HTTP/HTTPS URL to a document
/// * `backends`  — The registered backend set (usually [`Backend::ALL`])
/// * `config`    — Run configuration
///
/// # Returns
/// `Ok(ComparisonOutput)` whenever the run preconditions hold, even if
/// every backend failed (check `output.stats.failed`).
///
/// # Errors
/// Returns `Err(DocBenchError)` only for run-wide preconditions:
/// - Input file not found / permission denied / download failed
/// - An artifact could not be written
pub async fn compare(
    input_str: impl AsRef<str>,
    backends: &[Backend],
    config: &RunConfig,
) -> Result<ComparisonOutput, DocBenchError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting comparison run: {}", input_str);

    // ── Step 1: Resolve input (fails fast, before any backend) ───────────
    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let doc_path = resolved.path().to_path_buf();

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(backends.len());
    }

    // ── Step 2: Invoke every backend, isolated and concurrent ────────────
    let mut results: Vec<ConversionResult> = stream::iter(
        backends
            .iter()
            .map(|backend| run_backend(*backend, &doc_path, config)),
    )
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    // Deterministic report order regardless of completion order.
    results.sort_by(|a, b| a.backend.cmp(&b.backend));

    // ── Step 3: Normalise successful output ──────────────────────────────
    for result in &mut results {
        if result.error.is_none() {
            result.content = pipeline::normalize(&result.content, config.format);
        }
    }

    // ── Step 4: Persist one artifact per backend with content ────────────
    let mut artifacts = Vec::new();
    for result in &results {
        if result.has_content() {
            let path = write_artifact(config, &result.backend, &result.content).await?;
            debug!("Saved {} output to {}", result.backend, path.display());
            artifacts.push(path);
        } else if let Some(ref error) = result.error {
            warn!("{} failed: {}", result.backend, error);
        }
    }

    // ── Step 5: Compute stats ────────────────────────────────────────────
    let succeeded = artifacts.len();
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let stats = RunStats {
        total_backends: backends.len(),
        succeeded,
        failed,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Comparison complete: {}/{} backends, {}ms total",
        succeeded, stats.total_backends, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(stats.total_backends, succeeded);
    }

    Ok(ComparisonOutput {
        results,
        artifacts,
        stats,
    })
}

/// Convert one input through a single backend and return the normalised
/// content.
///
/// Unlike [`compare`], a backend failure here is fatal: this is the
/// single-conversion path behind the CLI's `--stdout` mode, where there
/// are no sibling backends to keep running.
pub async fn convert_with(
    input_str: impl AsRef<str>,
    backend: Backend,
    config: &RunConfig,
) -> Result<String, DocBenchError> {
    let resolved = input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    let raw = backend.convert(resolved.path(), config).await?;
    Ok(pipeline::normalize(&raw, config.format))
}

/// Drive one backend to a `ConversionResult`; never returns an error.
async fn run_backend(backend: Backend, doc_path: &Path, config: &RunConfig) -> ConversionResult {
    let start = Instant::now();
    let name = backend.name();

    if let Some(ref cb) = config.progress_callback {
        cb.on_backend_start(name);
    }

    let (content, error) = match backend.convert(doc_path, config).await {
        Ok(raw) => (raw, None),
        Err(e) => (String::new(), Some(e.to_string())),
    };
    let duration_ms = start.elapsed().as_millis() as u64;

    if let Some(ref cb) = config.progress_callback {
        match &error {
            None => cb.on_backend_complete(name, content.len(), duration_ms),
            Some(e) => cb.on_backend_error(name, e),
        }
    }

    ConversionResult {
        backend: name.to_string(),
        content,
        error,
        duration_ms,
    }
}

/// Write one backend's artifact: `output_<backend>.<ext>` in the output
/// directory, via temp file + rename so a crash never leaves a partial
/// artifact behind.
async fn write_artifact(
    config: &RunConfig,
    backend: &str,
    content: &str,
) -> Result<PathBuf, DocBenchError> {
    let path = config
        .output_dir
        .join(format!("output_{}.{}", backend, config.format.extension()));

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| DocBenchError::ArtifactWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    let tmp_path = path.with_extension(format!("{}.tmp", config.format.extension()));
    tokio::fs::write(&tmp_path, content)
        .await
        .map_err(|e| DocBenchError::ArtifactWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| DocBenchError::ArtifactWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    Ok(path)
}
