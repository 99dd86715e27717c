//! MarkItDown backend: Microsoft's fast structured converter via the
//! `markitdown` Python package.
//!
//! MarkItDown's single native output is the markdown-ish `text_content`
//! string, so `text` is served through it unchanged and `html` is produced
//! by rendering that text with the Python `markdown` library. `json` and
//! `doctags` have no reasonable mapping and are refused.

use std::path::Path;

use crate::backend::python;
use crate::config::{OutputFormat, RunConfig};
use crate::error::BackendError;

pub(crate) const NAME: &str = "markitdown";

pub(crate) async fn probe(config: &RunConfig) -> bool {
    python::probe_module(&config.python_bin, "markitdown").await
}

pub(crate) async fn convert(
    input: &Path,
    config: &RunConfig,
) -> Result<String, BackendError> {
    let script = match config.format {
        OutputFormat::Markdown | OutputFormat::Text => TEXT_SCRIPT,
        OutputFormat::Html => HTML_SCRIPT,
        OutputFormat::Json | OutputFormat::Doctags => {
            return Err(BackendError::UnsupportedFormat {
                backend: NAME.to_string(),
                format: config.format,
            });
        }
    };

    if !probe(config).await {
        return Err(BackendError::Unavailable {
            backend: NAME.to_string(),
            hint: "Install with: pip install markitdown".to_string(),
        });
    }

    python::run_script(
        NAME,
        &config.python_bin,
        script,
        input,
        config.convert_timeout_secs,
    )
    .await
}

const TEXT_SCRIPT: &str = r#"
import sys
from markitdown import MarkItDown

result = MarkItDown().convert(sys.argv[1])
print(result.text_content)
"#;

/// Newer releases expose HTML directly; otherwise render the markdown
/// text through the `markdown` library.
const HTML_SCRIPT: &str = r#"
import sys
from markitdown import MarkItDown

result = MarkItDown().convert(sys.argv[1])
html = getattr(result, "html_content", None) or getattr(result, "html", None)
if html is None:
    import markdown
    html = markdown.markdown(result.text_content, extensions=["extra", "tables", "fenced_code"])
print(html)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_is_refused_before_any_probe() {
        // Uses a bogus interpreter: the format check must fire first.
        let config = RunConfig::builder()
            .format(OutputFormat::Json)
            .python_bin("definitely-not-a-python-binary")
            .build()
            .unwrap();
        let err = convert(Path::new("doc.pdf"), &config).await.unwrap_err();
        assert!(matches!(err, BackendError::UnsupportedFormat { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn doctags_is_refused() {
        let config = RunConfig::builder()
            .format(OutputFormat::Doctags)
            .python_bin("definitely-not-a-python-binary")
            .build()
            .unwrap();
        assert!(convert(Path::new("doc.pdf"), &config).await.is_err());
    }
}
