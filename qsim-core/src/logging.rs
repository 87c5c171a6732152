//! Structured logging setup
//!
//! The simulator itself only emits `tracing` events (the arrival sampler
//! warns on fallback, the orchestrator logs run summaries); these helpers
//! install a subscriber for binaries and examples that want to see them.
//! `RUST_LOG` overrides the level as usual, e.g.
//! `RUST_LOG=qsim_core=debug`.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber at `info` level.
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Install a fmt subscriber at the given level ("trace" through "error").
/// The `RUST_LOG` environment variable takes precedence when set.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("qsim_core={level},qsim_metrics={level}").into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}
