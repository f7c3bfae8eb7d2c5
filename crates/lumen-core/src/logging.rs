//! Logging setup.
//!
//! Lumen logs through `tracing`; binaries and tests opt in to output by
//! installing a subscriber here. `RUST_LOG` takes precedence over the filter
//! passed in.

use tracing_subscriber::EnvFilter;

/// Filter used by [`init`].
pub const DEFAULT_FILTER: &str = "info,lumen_ui=debug";

pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install a global `fmt` subscriber.
///
/// Calling this more than once is harmless; only the first subscriber wins.
pub fn init_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("global tracing subscriber already installed");
    }
}
