//! Lumen Core
//!
//! Shared primitives for the Lumen UI toolkit: the event emitter, the
//! collaborator contracts a widget talks to (DOM access and animation),
//! style values, and the ambient logging/profiling/config plumbing.

pub mod alloc;
pub mod animate;
pub mod config;
pub mod dom;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod profiling;
pub mod style;

pub use animate::{AnimateOptions, Animator, Completion};
pub use config::{Config, ProfilingMode};
pub use dom::{Dom, InsertPosition, NodeId, NodeRegistry};
pub use event::{
    Emitter, EventError, EventResult, EventSource, IntoListener, Listener, ListenerError,
    ListenerFailure, ListenerResult,
};
pub use geometry::Size;
pub use style::{Property, Style, StyleValue};
