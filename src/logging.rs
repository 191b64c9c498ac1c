//! Logging setup for binaries built on this crate.
//!
//! The library itself only emits `tracing` events; nothing is printed unless the host installs
//! a subscriber. [`init_logging`] installs a formatted stderr subscriber with timestamps,
//! targets, and line numbers. `RUST_LOG` overrides the level passed in.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter used by [`init_logging`]: `RUST_LOG` if set and valid, else `level`.
pub fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install a global stderr subscriber at `level`.
///
/// Returns `false` if a global subscriber was already installed (the existing one is kept).
pub fn init_logging(level: LevelFilter) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init()
        .is_ok()
}
