//! Process-wide counters injected into widgets through [`UiContext`].
//!
//! Both counters only ever go up and have no reset operation.
//!
//! [`UiContext`]: crate::UiContext

use std::cell::Cell;

/// Identifier assigned to a window at construction.
pub type WindowId = u64;

/// Allocates window identifiers, starting at 0. Identifiers are never reused.
#[derive(Debug, Default)]
pub struct WindowIds {
    next: Cell<WindowId>,
}

impl WindowIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> WindowId {
        let id = self.next.get();
        self.next.set(id + 1);
        id
    }

    /// The identifier the next call to [`WindowIds::next`] returns.
    pub fn peek(&self) -> WindowId {
        self.next.get()
    }
}

/// Hands out increasing z-index values for overlays that do not pin one.
#[derive(Debug, Default)]
pub struct StackingIndex {
    current: Cell<u32>,
}

impl StackingIndex {
    /// Counter starting at `base`; the first allocation returns `base + 1`.
    pub fn new(base: u32) -> Self {
        Self {
            current: Cell::new(base),
        }
    }

    /// Allocate a fresh stacking index.
    pub fn next(&self) -> u32 {
        let next = self.current.get().saturating_add(1);
        self.current.set(next);
        next
    }

    /// The most recently allocated index (or the base if none was).
    pub fn current(&self) -> u32 {
        self.current.get()
    }
}
