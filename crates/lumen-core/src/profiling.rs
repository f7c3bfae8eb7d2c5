//! Profiling hooks based on the `puffin` crate.
//!
//! With the `profiling` feature disabled, [`profile_function!`] and
//! [`profile_scope!`] expand to nothing, so call sites can stay in place.

use crate::config::ProfilingMode;

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
pub use crate::__lumen_profile_noop as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__lumen_profile_noop as profile_scope;

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_profile_noop {
    ($($arg:tt)*) => {};
}

/// Address the puffin HTTP server listens on.
pub const PUFFIN_ADDR: &str = "127.0.0.1:8585";

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Enable profiling according to `mode`.
#[cfg(feature = "profiling")]
pub fn init_profiling(mode: ProfilingMode) {
    puffin::set_scopes_on(mode != ProfilingMode::Off);

    if mode == ProfilingMode::WithWebServer && PROFILING_SERVER.get().is_none() {
        match puffin_http::Server::new(PUFFIN_ADDR) {
            Ok(server) => {
                tracing::info!("puffin server listening on http://{}", PUFFIN_ADDR);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => tracing::error!("failed to start puffin server: {}", e),
        }
    }
}

/// Enable profiling according to `mode`.
#[cfg(not(feature = "profiling"))]
pub fn init_profiling(mode: ProfilingMode) {
    if mode != ProfilingMode::Off {
        tracing::warn!(?mode, "profiling requested but the `profiling` feature is disabled");
    }
}

/// Mark a frame boundary. Call once per animation frame.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
