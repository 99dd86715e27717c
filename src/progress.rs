//! Progress-callback trait for per-backend comparison events.
//!
//! Inject an [`Arc<dyn CompareProgressCallback>`] via
//! [`crate::config::RunConfigBuilder::progress_callback`] to receive
//! real-time events as the harness drives each backend.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a channel, a log file, or a terminal spinner
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so it works correctly when
//! backends run concurrently.

use std::sync::Arc;

/// Called by the comparison harness as it drives each backend.
///
/// Implementations must be `Send + Sync` (backends are invoked
/// concurrently). All methods have default no-op implementations so callers
/// only override what they care about.
///
/// # Thread safety
///
/// `on_backend_start`, `on_backend_complete`, and `on_backend_error` may be
/// called concurrently from different tasks. Implementations must protect
/// shared mutable state with appropriate synchronisation primitives.
pub trait CompareProgressCallback: Send + Sync {
    /// Called once before any backend is invoked.
    fn on_run_start(&self, total_backends: usize) {
        let _ = total_backends;
    }

    /// Called just before a backend's probe/convert sequence begins.
    fn on_backend_start(&self, backend: &str) {
        let _ = backend;
    }

    /// Called when a backend produced output.
    ///
    /// # Arguments
    /// * `backend`     — backend name
    /// * `bytes`       — byte length of the raw (pre-normalisation) output
    /// * `duration_ms` — wall-clock time the backend took
    fn on_backend_complete(&self, backend: &str, bytes: usize, duration_ms: u64) {
        let _ = (backend, bytes, duration_ms);
    }

    /// Called when a backend failed (unavailable, crashed, or refused the
    /// requested format).
    fn on_backend_error(&self, backend: &str, error: &str) {
        let _ = (backend, error);
    }

    /// Called once after all backends have been attempted.
    fn on_run_complete(&self, total_backends: usize, success_count: usize) {
        let _ = (total_backends, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl CompareProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::RunConfig`].
pub type ProgressCallback = Arc<dyn CompareProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        final_successes: AtomicUsize,
    }

    impl CompareProgressCallback for TrackingCallback {
        fn on_backend_start(&self, _backend: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_backend_complete(&self, _backend: &str, _bytes: usize, _duration_ms: u64) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_backend_error(&self, _backend: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_run_complete(&self, _total: usize, success_count: usize) {
            self.final_successes.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(3);
        cb.on_backend_start("docling");
        cb.on_backend_complete("docling", 1024, 42);
        cb.on_backend_error("markitdown", "not installed");
        cb.on_run_complete(3, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            final_successes: AtomicUsize::new(0),
        };

        tracker.on_run_start(3);
        tracker.on_backend_start("pdf-extract");
        tracker.on_backend_complete("pdf-extract", 512, 10);
        tracker.on_backend_start("docling");
        tracker.on_backend_error("docling", "engine missing");
        tracker.on_backend_start("markitdown");
        tracker.on_backend_complete("markitdown", 2048, 900);
        tracker.on_run_complete(3, 2);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.final_successes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn CompareProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_run_start(2);
        cb.on_backend_complete("docling", 64, 5);
    }
}
