//! Lumen UI - animated floating windows
//!
//! This crate builds overlay widgets on the primitives of `lumen-core`:
//! - [`Window`], a positioned panel with an open/close/resize lifecycle
//! - [`AnimationSystem`], a frame-driven [`Animator`](lumen_core::Animator)
//! - [`UiContext`], the DOM, animator and counters widgets share
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lumen_ui::{UiContext, Window, WindowOptions};
//!
//! let (ctx, animations) = UiContext::animated(dom, &Config::default());
//! let window = Window::new(&ctx, "#dialog", WindowOptions::new().width(420.0))?;
//!
//! window.on("open", Listener::from_fn(|event: &WindowEvent| {
//!     tracing::info!("window {} opened", event.window);
//! }))?;
//! window.open();
//!
//! // In the frame callback:
//! // animations.update(delta_time);
//! ```

pub mod animation;
pub mod context;
pub mod stacking;
#[cfg(target_arch = "wasm32")]
pub mod web;
pub mod window;

pub use animation::{Animation, AnimationState, AnimationSystem, EasingFunction};
pub use context::UiContext;
pub use stacking::{StackingIndex, WindowId, WindowIds};
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;
pub use window::{
    Content, Dimension, Offset, Placement, ResizeOptions, WINDOW_CLASS, Window, WindowCallback,
    WindowError, WindowEvent, WindowEventKind, WindowOptions, WindowResult, WindowState,
};
