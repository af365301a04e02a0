//! Tracing setup for embedding applications.
//!
//! The library itself only emits `tracing` events (skipped records,
//! unresolved update targets, degraded components); installing a
//! subscriber is the embedder's choice. This helper wires up the common
//! case: env-filtered output to stderr, configured via `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs a global stderr subscriber filtered by `RUST_LOG`. Safe to call
/// more than once; only the first call wins.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
