//! Conversion backends behind one capability surface.
//!
//! Backends form a small closed set that changes rarely and shares no
//! mutable state, so they are modelled as an enum with behaviour methods
//! rather than a trait-object hierarchy. Each variant dispatches to its
//! own submodule; the enum is `Copy` and a descriptor only — construction
//! is free and instances are reusable across runs.
//!
//! Every backend exposes the same contract:
//!
//! - [`Backend::probe`] — cheap availability check, never fails
//! - [`Backend::convert`] — raw (unnormalised) output on success, a
//!   [`BackendError`] naming the failure mode otherwise: `Unavailable`
//!   when the engine is missing, `ConversionFailed` when it ran and
//!   signalled an error, `UnsupportedFormat` when it cannot produce the
//!   requested format and has no sensible native mapping.

mod docling;
mod markitdown;
mod pdftext;
pub(crate) mod python;

use std::path::Path;

use crate::config::RunConfig;
use crate::error::BackendError;

/// One pluggable conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Pure-Rust text-layer extraction (`pdf-extract` crate), in-process.
    PdfExtract,
    /// Docling via a scoped Python subprocess.
    Docling,
    /// MarkItDown via a scoped Python subprocess.
    MarkItDown,
}

impl Backend {
    /// Every registered backend, in deterministic order.
    pub const ALL: [Backend; 3] = [Backend::PdfExtract, Backend::Docling, Backend::MarkItDown];

    /// Stable name used for artifact files and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::PdfExtract => pdftext::NAME,
            Backend::Docling => docling::NAME,
            Backend::MarkItDown => markitdown::NAME,
        }
    }

    /// Look a backend up by its stable name.
    pub fn from_name(name: &str) -> Option<Backend> {
        let needle = name.trim().to_lowercase();
        Self::ALL.iter().copied().find(|b| b.name() == needle)
    }

    /// Cheap availability check. Must not fail; an unreachable engine is
    /// simply reported unavailable.
    pub async fn probe(&self, config: &RunConfig) -> bool {
        match self {
            Backend::PdfExtract => pdftext::probe(config).await,
            Backend::Docling => docling::probe(config).await,
            Backend::MarkItDown => markitdown::probe(config).await,
        }
    }

    /// Convert `input` to the configured format, returning the raw engine
    /// output. Normalisation is the harness's job, not the adapter's.
    pub async fn convert(
        &self,
        input: &Path,
        config: &RunConfig,
    ) -> Result<String, BackendError> {
        match self {
            Backend::PdfExtract => pdftext::convert(input, config).await,
            Backend::Docling => docling::convert(input, config).await,
            Backend::MarkItDown => markitdown::convert(input, config).await,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
