//! Shared subprocess driver for Python-based backends.
//!
//! The heavyweight engines (Docling, MarkItDown) are Python libraries with
//! no stable CLI surface across versions, so each backend drives them
//! through a small generated script instead. The script is written to a
//! scoped temp file immediately before invocation and removed when the
//! guard drops — on success and failure alike, with removal failures
//! silently ignored.

use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::BackendError;

/// Probe whether a Python module can be imported.
///
/// Never fails: a missing interpreter, a missing module, and a broken
/// environment all report the same thing — the engine is unavailable.
pub async fn probe_module(python: &str, module: &str) -> bool {
    let status = Command::new(python)
        .arg("-c")
        .arg(format!("import {module}"))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(s) => s.success(),
        Err(e) => {
            debug!("probe of module '{}' via '{}' failed: {}", module, python, e);
            false
        }
    }
}

/// Write `script` to a temp file and run it with the input path as argv[1].
///
/// Returns captured stdout on a zero exit status. A non-zero exit maps to
/// [`BackendError::ConversionFailed`] carrying the tail of stderr; so does
/// exceeding `timeout_secs`.
pub async fn run_script(
    backend: &str,
    python: &str,
    script: &str,
    input: &Path,
    timeout_secs: u64,
) -> Result<String, BackendError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("docbench-")
        .suffix(".py")
        .tempfile()
        .map_err(|e| BackendError::ConversionFailed {
            backend: backend.to_string(),
            detail: format!("could not create temp script: {e}"),
        })?;
    tmp.write_all(script.as_bytes())
        .map_err(|e| BackendError::ConversionFailed {
            backend: backend.to_string(),
            detail: format!("could not write temp script: {e}"),
        })?;

    debug!(
        "running {} script {} on {}",
        backend,
        tmp.path().display(),
        input.display()
    );

    let run = Command::new(python)
        .arg(tmp.path())
        .arg(input)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(Duration::from_secs(timeout_secs), run).await {
        Err(_) => {
            return Err(BackendError::ConversionFailed {
                backend: backend.to_string(),
                detail: format!("timed out after {timeout_secs}s"),
            });
        }
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BackendError::Unavailable {
                backend: backend.to_string(),
                hint: format!("Python interpreter '{python}' not found on PATH."),
            });
        }
        Ok(Err(e)) => {
            return Err(BackendError::ConversionFailed {
                backend: backend.to_string(),
                detail: format!("failed to spawn '{python}': {e}"),
            });
        }
        Ok(Ok(output)) => output,
    };
    // `tmp` drops here; unlink failures are silently ignored.

    if !output.status.success() {
        return Err(BackendError::ConversionFailed {
            backend: backend.to_string(),
            detail: format!(
                "engine exited with {}: {}",
                output.status,
                stderr_tail(&output.stderr)
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Last few lines of stderr, enough to see the actual Python exception
/// without dumping an engine's whole warning spew into the error message.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "(no stderr)".to_string();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    let start = lines.len().saturating_sub(5);
    lines[start..].join(" | ")
}
