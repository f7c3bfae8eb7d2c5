//! Publish/subscribe event dispatch.
//!
//! An [`Emitter`] groups [`Listener`]s under named event types and fans
//! emitted events out to them synchronously, in registration order.
//!
//! # Example
//!
//! ```
//! use lumen_core::event::{Emitter, Listener};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let hits = Rc::new(Cell::new(0));
//! let counter = {
//!     let hits = hits.clone();
//!     Listener::from_fn(move |n: &u32| hits.set(hits.get() + n))
//! };
//!
//! let emitter = Emitter::new();
//! emitter.on("open close", &counter).unwrap();
//! emitter.emit("open close", &2).unwrap();
//! assert_eq!(hits.get(), 4);
//!
//! emitter.un("open", Some(&counter));
//! emitter.emit("open close", &1).unwrap();
//! assert_eq!(hits.get(), 5);
//! ```

mod emitter;
mod error;
mod listener;
mod source;

pub use emitter::{DEFAULT_MAX_LISTENERS, Emitter, event_types};
pub use error::{EventError, EventResult, ListenerFailure};
pub use listener::{IntoListener, Listener, ListenerError, ListenerResult};
pub use source::EventSource;
