//! In-process extraction backend built on the pure-Rust `pdf-extract`
//! crate: fast, dependency-free, text-layer only.
//!
//! The cheapest baseline in the comparison — no external engine, no
//! layout understanding. `markdown` output is the extracted text with
//! basic shaping applied (page markers stripped, paragraph breaks after
//! sentence ends); `text` is the raw extraction. Everything else is
//! refused: there is no structure to render HTML or DocTags from.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{OutputFormat, RunConfig};
use crate::error::BackendError;

pub(crate) const NAME: &str = "pdf-extract";

/// In-process, so always available.
pub(crate) async fn probe(_config: &RunConfig) -> bool {
    true
}

pub(crate) async fn convert(
    input: &Path,
    config: &RunConfig,
) -> Result<String, BackendError> {
    match config.format {
        OutputFormat::Markdown | OutputFormat::Text => {}
        other => {
            return Err(BackendError::UnsupportedFormat {
                backend: NAME.to_string(),
                format: other,
            });
        }
    }

    // Extraction is CPU-bound and synchronous; keep it off the async
    // executor's hot path.
    let path = input.to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| BackendError::ConversionFailed {
            backend: NAME.to_string(),
            detail: format!("extraction task panicked: {e}"),
        })?
        .map_err(|e| BackendError::ConversionFailed {
            backend: NAME.to_string(),
            detail: e.to_string(),
        })?;

    Ok(match config.format {
        OutputFormat::Markdown => markdownify(&text),
        _ => text,
    })
}

static RE_PAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-- \d+ of \d+ --").unwrap());
static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?])\s+").unwrap());

/// Basic markdown shaping of raw extracted text.
///
/// Deliberately crude: this backend has no structural information, so the
/// best it can do is drop `-- 1 of 9 --` page markers and break paragraphs
/// at sentence ends.
fn markdownify(text: &str) -> String {
    let s = RE_PAGE_MARKER.replace_all(text, "");
    let s = RE_EXCESS_NEWLINES.replace_all(&s, "\n\n");
    let s = RE_SENTENCE_END.replace_all(&s, "${1}\n\n");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdownify_strips_page_markers() {
        let input = "Intro text. -- 1 of 9 --\nMore text.";
        let out = markdownify(input);
        assert!(!out.contains("-- 1 of 9 --"));
        assert!(out.contains("Intro text."));
    }

    #[test]
    fn markdownify_breaks_paragraphs_at_sentence_ends() {
        let out = markdownify("First sentence. Second sentence! Third?");
        assert_eq!(out, "First sentence.\n\nSecond sentence!\n\nThird?");
    }

    #[test]
    fn markdownify_collapses_newline_runs() {
        let out = markdownify("a\n\n\n\n\nb");
        assert!(!out.contains("\n\n\n"));
    }

    #[tokio::test]
    async fn html_is_refused() {
        let config = RunConfig::builder()
            .format(OutputFormat::Html)
            .build()
            .unwrap();
        let err = convert(Path::new("doc.pdf"), &config).await.unwrap_err();
        assert!(matches!(err, BackendError::UnsupportedFormat { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn missing_file_is_conversion_failed() {
        let config = RunConfig::default();
        let err = convert(Path::new("/definitely/not/here.pdf"), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::ConversionFailed { .. }), "got: {err}");
    }
}
