//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/telemetry. Hosts can install their own subscriber; this
/// helper installs a default `RUST_LOG`-based subscriber if none is set.
pub fn init_tracing() {
    install(EnvFilter::from_default_env());
}

/// Like [`init_tracing`], but falls back to `directive` (e.g.
/// `"threshold_oversubscription=debug"`) when `RUST_LOG` is unset or invalid.
pub fn init_tracing_with_default(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    install(filter);
}

fn install(filter: EnvFilter) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
