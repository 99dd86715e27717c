//! # docbench
//!
//! Benchmark multiple document-conversion backends against the same input
//! and produce normalised, comparable output artifacts.
//!
//! ## Why this crate?
//!
//! Conversion engines disagree. One prints internal diagnostics on stdout
//! with no separator, another triples blank lines between blocks, a third
//! leaves bare URLs as dead text in its HTML. Comparing their raw outputs
//! is mostly comparing their quirks. This crate runs each engine through
//! one uniform adapter contract and pushes every output through the same
//! normalisation pipeline, so the artifacts that land on disk differ only
//! where the conversions actually differ.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document
//!  │
//!  ├─ 1. Input      resolve local file or download from URL
//!  ├─ 2. Backends   pdf-extract (in-process) / docling / markitdown
//!  │                (isolated, concurrent; one ConversionResult each)
//!  ├─ 3. Noise      drop engine diagnostic lines (len(...)=, 0-0)
//!  ├─ 4. Whitespace collapse blank-line runs, trim
//!  ├─ 5. Linkify    bare URLs → anchors (HTML output only, tags untouched)
//!  └─ 6. Artifacts  output_<backend>.<ext> + bounded console preview
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docbench::{compare, Backend, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::default();
//!     let output = compare("document.pdf", &Backend::ALL, &config).await?;
//!     for result in &output.results {
//!         match &result.error {
//!             None => println!("{}: {} bytes", result.backend, result.content.len()),
//!             Some(e) => eprintln!("{} failed: {}", result.backend, e),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docbench` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! docbench = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod compare;
pub mod config;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod progress;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::Backend;
pub use compare::{compare, convert_with};
pub use config::{OutputFormat, RunConfig, RunConfigBuilder};
pub use error::{BackendError, DocBenchError};
pub use progress::{CompareProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{ComparisonOutput, ConversionResult, RunStats, preview};
