//! CLI binary for docbench.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`,
//! drives a comparison (or a single conversion with `--stdout`), and
//! prints per-backend previews.

use anyhow::{Context, Result};
use clap::Parser;
use docbench::{
    compare, convert_with, preview, Backend, CompareProgressCallback, OutputFormat,
    ProgressCallback, RunConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a progress bar over the backend set with
/// per-backend log lines. Backends complete out of order (concurrent
/// invocation), so all printing goes through the bar.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_run_start`.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  [{bar:30.green/238}] {pos}/{len} backends  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl CompareProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_backends: usize) {
        self.bar.set_length(total_backends as u64);
    }

    fn on_backend_start(&self, backend: &str) {
        self.bar.set_message(backend.to_string());
    }

    fn on_backend_complete(&self, backend: &str, bytes: usize, duration_ms: u64) {
        self.bar.println(format!(
            "  {} {:<12} {:<12} {}",
            green("✓"),
            backend,
            dim(&format!("{bytes:>7} bytes")),
            dim(&format!("{:.1}s", duration_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_backend_error(&self, backend: &str, error: &str) {
        // First line only; full messages reappear in the failure notices.
        let first = error.lines().next().unwrap_or(error);
        self.bar
            .println(format!("  {} {:<12} {}", red("✗"), backend, red(first)));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _total_backends: usize, _success_count: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Compare all backends, artifacts in the current directory
  docbench document.pdf

  # HTML comparison into a separate directory
  docbench document.pdf -f html -o out/

  # Restrict the backend set
  docbench document.pdf --backend docling --backend pdf-extract

  # Single conversion on stdout (exit 1 on failure)
  docbench document.pdf --backend docling --stdout > doc.md

  # Machine-readable report
  docbench document.pdf --json > report.json

  # Compare a document fetched from a URL
  docbench https://arxiv.org/pdf/1706.03762v7.pdf

  # Which engines are installed?
  docbench --list-backends

BACKENDS:
  Backend       Engine                       Formats
  ───────────   ──────────────────────────   ─────────────────────────────
  pdf-extract   pure Rust, in-process        markdown, text
  docling       pip install docling          markdown, html, json, text, doctags
  markitdown    pip install markitdown       markdown, html, text

ARTIFACTS:
  One file per backend, named output_<backend>.<ext> (md, html, json, txt,
  doctags), written to --output-dir. Backends that fail write nothing.

ENVIRONMENT VARIABLES:
  DOCBENCH_FORMAT       Default output format
  DOCBENCH_OUTPUT_DIR   Default artifact directory
  DOCBENCH_PYTHON       Python interpreter for subprocess backends
"#;

/// Benchmark document conversion backends and normalise their output.
#[derive(Parser, Debug)]
#[command(
    name = "docbench",
    version,
    about = "Benchmark document conversion backends and normalise their output",
    long_about = "Run the same document through several conversion engines, normalise every \
output (noise filtering, whitespace collapsing, bare-URL linkification for HTML), and write \
one comparable artifact per backend.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local document path or HTTP/HTTPS URL.
    #[arg(required_unless_present = "list_backends")]
    input: Option<String>,

    /// Output format: markdown (md), html, json, text, doctags.
    #[arg(short, long, env = "DOCBENCH_FORMAT", default_value = "markdown")]
    format: String,

    /// Directory artifacts are written to.
    #[arg(short, long, env = "DOCBENCH_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Restrict the run to these backends (repeatable).
    #[arg(long = "backend", value_name = "NAME")]
    backends: Vec<String>,

    /// Print one backend's normalised output to stdout instead of writing
    /// artifacts. Requires exactly one --backend.
    #[arg(long)]
    stdout: bool,

    /// Output the full comparison report as JSON.
    #[arg(long, env = "DOCBENCH_JSON")]
    json: bool,

    /// List registered backends and their availability, then exit.
    #[arg(long)]
    list_backends: bool,

    /// Number of backends invoked concurrently.
    #[arg(short, long, env = "DOCBENCH_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Python interpreter used for subprocess backends.
    #[arg(long, env = "DOCBENCH_PYTHON", default_value = "python3")]
    python: String,

    /// Per-backend conversion timeout in seconds.
    #[arg(long, env = "DOCBENCH_TIMEOUT", default_value_t = 300)]
    timeout: u64,

    /// HTTP download timeout in seconds for URL inputs.
    #[arg(long, env = "DOCBENCH_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCBENCH_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors (artifacts are still written).
    #[arg(short, long, env = "DOCBENCH_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.json && !cli.stdout;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Resolve the backend set ──────────────────────────────────────────
    let backends: Vec<Backend> = if cli.backends.is_empty() {
        Backend::ALL.to_vec()
    } else {
        cli.backends
            .iter()
            .map(|name| {
                Backend::from_name(name).with_context(|| {
                    format!(
                        "Unknown backend '{}'. Registered backends: {}",
                        name,
                        Backend::ALL.map(|b| b.name()).join(", ")
                    )
                })
            })
            .collect::<Result<_>>()?
    };

    // ── Build config ─────────────────────────────────────────────────────
    let format: OutputFormat = cli.format.parse()?;

    let mut builder = RunConfig::builder()
        .format(format)
        .output_dir(&cli.output_dir)
        .concurrency(cli.concurrency)
        .python_bin(&cli.python)
        .convert_timeout_secs(cli.timeout)
        .download_timeout_secs(cli.download_timeout);

    if show_progress && !cli.list_backends {
        let cb = CliProgressCallback::new_dynamic();
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── List mode ────────────────────────────────────────────────────────
    if cli.list_backends {
        for backend in &backends {
            let available = backend.probe(&config).await;
            let marker = if available {
                green("available")
            } else {
                red("not installed")
            };
            println!("{:<12} {}", backend.name(), marker);
        }
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .expect("clap enforces input unless --list-backends");

    // ── Single-conversion mode ───────────────────────────────────────────
    if cli.stdout {
        if backends.len() != 1 {
            anyhow::bail!(
                "--stdout requires exactly one --backend (got {})",
                backends.len()
            );
        }
        let content = convert_with(input, backends[0], &config)
            .await
            .context("Conversion failed")?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        if !content.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
        return Ok(());
    }

    // ── Comparison mode ──────────────────────────────────────────────────
    if !cli.quiet && !cli.json {
        eprintln!(
            "{} {}",
            cyan("◆"),
            bold(&format!(
                "Comparing {} backends on {}",
                backends.len(),
                input
            ))
        );
    }

    let output = compare(input, &backends, &config)
        .await
        .context("Comparison run failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise report")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet {
        // Per-backend artifact lines and previews, ordered by name.
        eprintln!();
        for result in &output.results {
            if result.has_content() {
                let path = config
                    .output_dir
                    .join(format!("output_{}.{}", result.backend, config.format.extension()));
                eprintln!(
                    "{} Saved {} output to: {}",
                    green("✓"),
                    bold(&result.backend),
                    path.display()
                );
                eprintln!("{}", dim(&format!("{} preview:", result.backend)));
                eprintln!("  {}\n", preview(&result.content, config.preview_chars));
            } else if let Some(ref error) = result.error {
                eprintln!("{} {} failed: {}\n", red("✗"), bold(&result.backend), error);
            } else {
                eprintln!(
                    "{} {} produced no output\n",
                    dim("∅"),
                    bold(&result.backend)
                );
            }
        }

        let stats = &output.stats;
        eprintln!(
            "{}  {}/{} backends  {}ms",
            if stats.failed == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            stats.succeeded,
            stats.total_backends,
            stats.total_duration_ms,
        );
    }

    Ok(())
}
