//! Configuration types for a comparison run.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share configs across tasks, serialise them for logging, and diff two
//! runs to understand why their artifacts differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely
//! on well-documented defaults for the rest.

use crate::error::DocBenchError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format requested from every backend in a run.
///
/// `md` is accepted as an alias for `markdown` when parsing. Backends that
/// cannot produce a format either map it to their nearest native format or
/// fail with [`crate::error::BackendError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// GitHub-flavoured Markdown. (default)
    #[default]
    Markdown,
    /// HTML; the only format that goes through the linkifier stage.
    Html,
    /// Engine-native JSON document dump.
    Json,
    /// Plain text.
    Text,
    /// Docling's DocTags serialisation.
    Doctags,
}

impl OutputFormat {
    /// File extension used for artifacts of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
            OutputFormat::Doctags => "doctags",
        }
    }

    /// Whether normalised output of this format should be linkified.
    pub fn is_html(&self) -> bool {
        matches!(self, OutputFormat::Html)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Doctags => "doctags",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = DocBenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            "doctags" => Ok(Self::Doctags),
            other => Err(DocBenchError::UnsupportedFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration for one comparison run.
///
/// Built via [`RunConfig::builder()`] or [`RunConfig::default()`].
///
/// # Example
/// ```rust
/// use docbench::{OutputFormat, RunConfig};
///
/// let config = RunConfig::builder()
///     .format(OutputFormat::Html)
///     .output_dir("out")
///     .preview_chars(120)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Output format requested from every backend. Default: Markdown.
    pub format: OutputFormat,

    /// Directory artifacts are written to. Default: current directory.
    ///
    /// One file per backend, named `output_<backend>.<ext>`, created on
    /// demand. Artifacts from a previous run with the same backend set are
    /// overwritten.
    pub output_dir: PathBuf,

    /// Maximum characters of normalised content shown in a preview. Default: 300.
    pub preview_chars: usize,

    /// Number of backends invoked concurrently. Default: 4.
    ///
    /// Backends are isolated (own subprocess, own artifact path), so
    /// concurrency only trades wall-clock time against peak load. The
    /// heavyweight engines are Python processes doing their own internal
    /// parallelism; going beyond the backend count buys nothing.
    pub concurrency: usize,

    /// Python interpreter used for subprocess backends. Default: "python3".
    ///
    /// Probing and conversion both go through this binary, so pointing it
    /// at a venv interpreter is all that is needed to pick up engines
    /// installed there.
    pub python_bin: String,

    /// Per-backend conversion timeout in seconds. Default: 300.
    ///
    /// Document-understanding engines can legitimately take minutes on
    /// large inputs; five minutes bounds a hung engine without cutting off
    /// slow-but-working ones.
    pub convert_timeout_secs: u64,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Optional progress callback receiving per-backend events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            output_dir: PathBuf::from("."),
            preview_chars: 300,
            concurrency: 4,
            python_bin: "python3".to_string(),
            convert_timeout_secs: 300,
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("format", &self.format)
            .field("output_dir", &self.output_dir)
            .field("preview_chars", &self.preview_chars)
            .field("concurrency", &self.concurrency)
            .field("python_bin", &self.python_bin)
            .field("convert_timeout_secs", &self.convert_timeout_secs)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn preview_chars(mut self, n: usize) -> Self {
        self.config.preview_chars = n.max(1);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn python_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.python_bin = bin.into();
        self
    }

    pub fn convert_timeout_secs(mut self, secs: u64) -> Self {
        self.config.convert_timeout_secs = secs;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunConfig, DocBenchError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(DocBenchError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if c.python_bin.trim().is_empty() {
            return Err(DocBenchError::InvalidConfig(
                "Python binary name must not be empty".into(),
            ));
        }
        if c.convert_timeout_secs == 0 {
            return Err(DocBenchError::InvalidConfig(
                "Conversion timeout must be ≥ 1s".into(),
            ));
        }
        Ok(self.config)
    }
}
