//! Step-by-step [`Animator`] for testing.
//!
//! Animations never finish on their own; the test decides when each one
//! completes, which makes interleavings such as "close while opening"
//! reproducible.

use std::collections::VecDeque;
use std::rc::Rc;

use lumen_core::{AnimateOptions, Animator, Completion, Dom, NodeId, Style};
use parking_lot::Mutex;

/// Records an [`Animator::animate`] call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimateCall {
    pub node: NodeId,
    pub target: Style,
    pub options: AnimateOptions,
}

struct Pending {
    node: NodeId,
    target: Style,
    on_complete: Completion,
}

/// Mock implementation of [`Animator`] for testing.
///
/// Completions are queued in call order and run by
/// [`MockAnimator::complete_next`] / [`MockAnimator::complete_all`]. With a
/// DOM attached, completing an animation first writes its target style.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use lumen_core::{AnimateOptions, Animator, NodeId, Style};
/// use lumen_test_utils::MockAnimator;
///
/// let animator = MockAnimator::new();
/// let done = Rc::new(Cell::new(false));
/// let flag = done.clone();
/// animator.animate(
///     NodeId(1),
///     Style::new(),
///     AnimateOptions::default(),
///     Box::new(move || flag.set(true)),
/// );
///
/// assert_eq!(animator.pending(), 1);
/// assert!(animator.complete_next());
/// assert!(done.get());
/// ```
#[derive(Default)]
pub struct MockAnimator {
    dom: Option<Rc<dyn Dom>>,
    /// Recorded calls for verification
    calls: Mutex<Vec<AnimateCall>>,
    pending: Mutex<VecDeque<Pending>>,
}

impl MockAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animator that applies each target style to `dom` on completion.
    pub fn with_dom(dom: Rc<dyn Dom>) -> Self {
        Self {
            dom: Some(dom),
            ..Default::default()
        }
    }

    /// Number of animations waiting for completion.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Complete the oldest pending animation. Returns `false` if none was
    /// pending.
    pub fn complete_next(&self) -> bool {
        let next = self.pending.lock().pop_front();
        match next {
            Some(pending) => {
                self.finish(pending);
                true
            }
            None => false,
        }
    }

    /// Complete pending animations until none is left, including ones
    /// started by completions. Returns how many completed.
    pub fn complete_all(&self) -> usize {
        let mut completed = 0;
        while self.complete_next() {
            completed += 1;
        }
        completed
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<AnimateCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear recorded calls; pending completions are kept.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn finish(&self, pending: Pending) {
        if let Some(dom) = &self.dom {
            dom.apply(pending.node, &pending.target);
        }
        (pending.on_complete)();
    }
}

impl Animator for MockAnimator {
    fn animate(
        &self,
        node: NodeId,
        target: Style,
        options: AnimateOptions,
        on_complete: Completion,
    ) {
        self.calls.lock().push(AnimateCall {
            node,
            target: target.clone(),
            options,
        });
        self.pending.lock().push_back(Pending {
            node,
            target,
            on_complete,
        });
    }
}

impl std::fmt::Debug for MockAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAnimator")
            .field("calls", &self.call_count())
            .field("pending", &self.pending())
            .finish()
    }
}
