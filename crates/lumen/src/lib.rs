//! Lumen - a small browser UI toolkit
//!
//! Lumen provides:
//!
//! - **Event Emitter**: named, multi-listener events with bounded pools
//! - **Window**: an animated floating panel with an open/close lifecycle
//! - **Animation**: a frame-driven animator for inline styles
//! - **Collaborator Traits**: `Dom` and `Animator`, so widgets run against a
//!   browser, a test double, or anything in between
//!
//! # Quick Start
//!
//! ```ignore
//! use lumen::prelude::*;
//!
//! let config = Config::default();
//! lumen::init(&config);
//!
//! let dom = Rc::new(WebDom::new().expect("no document"));
//! let (ctx, animations) = UiContext::animated(dom, &config);
//!
//! let window = Window::new(&ctx, "#login", WindowOptions::new().width(360.0))?;
//! window.open_with(|w| tracing::info!("window {} is open", w.id()));
//!
//! // From requestAnimationFrame:
//! animations.update(delta_time);
//! ```

pub use lumen_core as core;

#[cfg(feature = "ui")]
pub use lumen_ui as ui;

pub use lumen_core::{
    AnimateOptions, Animator, Config, Dom, Emitter, EventError, EventResult, EventSource,
    Listener, NodeId, ProfilingMode, Property, Size, Style, StyleValue,
};

#[cfg(feature = "ui")]
pub use lumen_ui::{
    AnimationSystem, Dimension, Offset, ResizeOptions, UiContext, Window, WindowError,
    WindowEvent, WindowEventKind, WindowOptions, WindowState,
};

/// Install logging and profiling as described by `config`.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(config: &Config) {
    lumen_core::logging::init_with_filter(&config.log_filter);
    lumen_core::profiling::init_profiling(config.profiling);
    tracing::debug!(?config, "lumen initialized");
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use lumen_core::{
        AnimateOptions, Animator, Config, Dom, Emitter, EventSource, Listener, NodeId, Property,
        Size, Style, StyleValue,
    };

    #[cfg(feature = "ui")]
    pub use lumen_ui::{
        AnimationSystem, Dimension, Offset, ResizeOptions, UiContext, Window, WindowEvent,
        WindowEventKind, WindowOptions, WindowState,
    };

    #[cfg(all(feature = "ui", target_arch = "wasm32"))]
    pub use lumen_ui::WebDom;
}
