//! Logging setup
//!
//! Events are emitted with `tracing` and printed by a `tracing-subscriber`
//! formatter. The filter comes from `RUST_LOG` when set.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "pizzeria=info,tower_http=info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing() {
    let _ = fmt().with_env_filter(env_filter()).try_init();
}
