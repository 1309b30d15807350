//! Logging Setup
//!
//! Structured logging via the `tracing` ecosystem. The decoder core only
//! emits events (mode transitions, hold-over progress); binaries and
//! examples call [`init`] once to install a subscriber honoring `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
