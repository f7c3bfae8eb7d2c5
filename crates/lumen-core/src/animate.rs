//! Animation contract.

use std::time::Duration;

use crate::dom::NodeId;
use crate::style::Style;

/// Callback fired once an animation has finished.
pub type Completion = Box<dyn FnOnce()>;

/// Timing of a single animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimateOptions {
    pub duration: Duration,
    /// Easing curve name, resolved by the [`Animator`]
    pub easing: String,
}

impl AnimateOptions {
    pub fn new(duration: Duration, easing: impl Into<String>) -> Self {
        Self {
            duration,
            easing: easing.into(),
        }
    }
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self::new(Duration::from_millis(400), "linear")
    }
}

/// Drives a node's inline style towards a target over time.
///
/// Implementations must invoke `on_complete` exactly once, after the target
/// style has been written, and must not hold internal borrows while doing
/// so: the callback is allowed to start another animation.
pub trait Animator {
    fn animate(
        &self,
        node: NodeId,
        target: Style,
        options: AnimateOptions,
        on_complete: Completion,
    );
}
