//! Diagnostic logging setup
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` overrides the
//! default filter, e.g. `RUST_LOG=watermarker=trace` to follow preview
//! creation and release.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "watermarker=info";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
