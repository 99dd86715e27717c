//! Docling backend: high-quality structural conversion via the `docling`
//! Python package.
//!
//! Docling is the engine whose diagnostic lines (`len(pages)=1, 0-0` and
//! bare range lists) motivated the noise filter — it prints them on stdout
//! interleaved with the converted document.

use std::path::Path;

use crate::backend::python;
use crate::config::{OutputFormat, RunConfig};
use crate::error::BackendError;

pub(crate) const NAME: &str = "docling";

pub(crate) async fn probe(config: &RunConfig) -> bool {
    python::probe_module(&config.python_bin, "docling").await
}

pub(crate) async fn convert(
    input: &Path,
    config: &RunConfig,
) -> Result<String, BackendError> {
    if !probe(config).await {
        return Err(BackendError::Unavailable {
            backend: NAME.to_string(),
            hint: "Install with: pip install docling".to_string(),
        });
    }

    let script = script_for(config.format);
    python::run_script(
        NAME,
        &config.python_bin,
        &script,
        input,
        config.convert_timeout_secs,
    )
    .await
}

/// Docling exports every format in the enumerated set natively.
fn script_for(format: OutputFormat) -> String {
    let export = match format {
        OutputFormat::Markdown => "result.document.export_to_markdown()",
        OutputFormat::Html => "result.document.export_to_html()",
        OutputFormat::Text => "result.document.export_to_text()",
        OutputFormat::Doctags => "result.document.export_to_doctags()",
        OutputFormat::Json => "json.dumps(result.document.export_to_dict(), ensure_ascii=False)",
    };

    format!(
        r#"
import sys
import json
from docling.document_converter import DocumentConverter

converter = DocumentConverter()
result = converter.convert(sys.argv[1])
print({export})
"#
    )
}
