use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Build the filter for the global subscriber.
///
/// `RUST_LOG` wins when it is set and valid; otherwise `log_level` is used,
/// falling back to `"info"` if it is not a valid directive.
pub fn build_filter(log_level: &str, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(log_level.to_lowercase()).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialise the global `tracing` subscriber.
///
/// All log output goes to stderr; stdout is reserved for the final error line.
pub fn setup_logging(log_level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(log_level, rust_log.as_deref());

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (e.g. in tests).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

// ── Tests ──────────────────────────────────────────────────────────────────────
