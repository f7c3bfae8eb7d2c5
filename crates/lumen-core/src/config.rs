//! Toolkit-wide configuration.

use crate::event::DEFAULT_MAX_LISTENERS;
use crate::logging::DEFAULT_FILTER;

/// Configuration shared by every widget created from one context.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Listener capacity per event type on each emitter.
    pub max_listeners: usize,
    /// Value the stacking allocator counts up from. The first allocated
    /// index is `stacking_base + 1`.
    pub stacking_base: u32,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_listeners: DEFAULT_MAX_LISTENERS,
            stacking_base: 0,
            log_filter: DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    #[default]
    Off,
    /// Scopes are recorded in-process
    On,
    /// Scopes are recorded and served to `puffin_viewer` over HTTP
    WithWebServer,
}
