//! Floating, animated overlay window.
//!
//! A [`Window`] wraps an existing content node in an absolutely positioned
//! element, animates it in and out, and announces the end of each
//! transition through its emitter (`"open"`, `"close"`).

mod error;
mod options;
mod placement;
#[allow(clippy::module_inception)]
mod window;

pub use error::{WindowError, WindowResult};
pub use options::{Dimension, Offset, ResizeOptions, WindowOptions};
pub use placement::{Placement, horizontal_center, measure, resolve_offsets, vertical_bias};
pub use window::{
    Content, WINDOW_CLASS, Window, WindowCallback, WindowEvent, WindowEventKind, WindowState,
};
