//! Shared collaborators for widgets.

use std::rc::Rc;

use lumen_core::{Animator, Config, Dom};

use crate::animation::AnimationSystem;
use crate::stacking::{StackingIndex, WindowIds};

/// Everything a widget needs from its environment.
///
/// Cloning a context is cheap and every clone shares the same DOM, animator
/// and counters.
#[derive(Clone)]
pub struct UiContext {
    dom: Rc<dyn Dom>,
    animator: Rc<dyn Animator>,
    ids: Rc<WindowIds>,
    stacking: Rc<StackingIndex>,
    max_listeners: usize,
}

impl UiContext {
    pub fn new(dom: Rc<dyn Dom>, animator: Rc<dyn Animator>) -> Self {
        Self::with_config(dom, animator, &Config::default())
    }

    pub fn with_config(dom: Rc<dyn Dom>, animator: Rc<dyn Animator>, config: &Config) -> Self {
        Self::from_parts(
            dom,
            animator,
            Rc::new(WindowIds::new()),
            Rc::new(StackingIndex::new(config.stacking_base)),
            config.max_listeners,
        )
    }

    /// Context over existing counters.
    ///
    /// Contexts built from the same `ids` and `stacking` never hand out the
    /// same window id or stacking index.
    pub fn from_parts(
        dom: Rc<dyn Dom>,
        animator: Rc<dyn Animator>,
        ids: Rc<WindowIds>,
        stacking: Rc<StackingIndex>,
        max_listeners: usize,
    ) -> Self {
        Self {
            dom,
            animator,
            ids,
            stacking,
            max_listeners,
        }
    }

    /// Context over other collaborators that keeps allocating from this
    /// context's counters.
    pub fn with_collaborators(&self, dom: Rc<dyn Dom>, animator: Rc<dyn Animator>) -> Self {
        Self::from_parts(
            dom,
            animator,
            self.ids.clone(),
            self.stacking.clone(),
            self.max_listeners,
        )
    }

    /// Context animated by a fresh [`AnimationSystem`] over `dom`.
    ///
    /// The caller drives the returned system from its frame loop.
    pub fn animated(dom: Rc<dyn Dom>, config: &Config) -> (Self, Rc<AnimationSystem>) {
        let animations = Rc::new(AnimationSystem::new(dom.clone()));
        let context = Self::with_config(dom, animations.clone(), config);
        (context, animations)
    }

    pub fn dom(&self) -> &dyn Dom {
        self.dom.as_ref()
    }

    pub fn animator(&self) -> &dyn Animator {
        self.animator.as_ref()
    }

    pub fn ids(&self) -> &WindowIds {
        &self.ids
    }

    pub fn stacking(&self) -> &StackingIndex {
        &self.stacking
    }

    /// Listener capacity for emitters of widgets built from this context.
    pub fn max_listeners(&self) -> usize {
        self.max_listeners
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("next_window_id", &self.ids.peek())
            .field("stacking", &self.stacking.current())
            .field("max_listeners", &self.max_listeners)
            .finish()
    }
}
