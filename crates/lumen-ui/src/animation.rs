//! Frame-driven style animation.
//!
//! [`AnimationSystem`] implements the [`Animator`] contract on top of any
//! [`Dom`]: each `animate` call becomes a transition that tweens the numeric
//! properties of its target style, and [`AnimationSystem::update`] advances
//! every running transition by the frame's delta time.
//!
//! # Example
//!
//! ```ignore
//! use lumen_ui::animation::AnimationSystem;
//!
//! let animations = Rc::new(AnimationSystem::new(dom.clone()));
//! animations.animate(node, target, AnimateOptions::new(duration, "ease-out"), Box::new(|| {}));
//!
//! // In the frame callback:
//! animations.update(delta_time);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use lumen_core::alloc::IndexMap;
use lumen_core::profiling::profile_function;
use lumen_core::{AnimateOptions, Animator, Completion, Dom, NodeId, Property, Style, StyleValue};

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Pull back before accelerating
    BackIn,
    /// Overshoot, then settle
    BackOut,
    /// Pull back, overshoot, settle
    BackInOut,
    /// Bounce effect
    Bounce,
    /// Elastic effect
    Elastic,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in-out
    CubicInOut,
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

impl EasingFunction {
    /// Resolve a CSS-style easing name such as `ease-in-out-back`.
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name.trim() {
            "linear" => EasingFunction::Linear,
            "ease-in" => EasingFunction::EaseIn,
            "ease-out" => EasingFunction::EaseOut,
            "ease" | "ease-in-out" => EasingFunction::EaseInOut,
            "ease-in-back" => EasingFunction::BackIn,
            "ease-out-back" => EasingFunction::BackOut,
            "ease-in-out-back" => EasingFunction::BackInOut,
            "bounce" | "ease-out-bounce" => EasingFunction::Bounce,
            "elastic" | "ease-out-elastic" => EasingFunction::Elastic,
            "ease-in-cubic" => EasingFunction::CubicIn,
            "ease-out-cubic" => EasingFunction::CubicOut,
            "ease-in-out-cubic" => EasingFunction::CubicInOut,
            _ => return None,
        };
        Some(easing)
    }

    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    ///
    /// The back and elastic curves leave the 0..1 range in between.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => t * (2.0 - t),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            EasingFunction::BackIn => BACK_C3 * t * t * t - BACK_C1 * t * t,
            EasingFunction::BackOut => {
                let t = t - 1.0;
                1.0 + BACK_C3 * t * t * t + BACK_C1 * t * t
            }
            EasingFunction::BackInOut => {
                if t < 0.5 {
                    let t2 = 2.0 * t;
                    t2 * t2 * ((BACK_C2 + 1.0) * t2 - BACK_C2) / 2.0
                } else {
                    let t2 = 2.0 * t - 2.0;
                    (t2 * t2 * ((BACK_C2 + 1.0) * t2 + BACK_C2) + 2.0) / 2.0
                }
            }
            EasingFunction::Bounce => {
                if t < 1.0 / 2.75 {
                    7.5625 * t * t
                } else if t < 2.0 / 2.75 {
                    let t = t - 1.5 / 2.75;
                    7.5625 * t * t + 0.75
                } else if t < 2.5 / 2.75 {
                    let t = t - 2.25 / 2.75;
                    7.5625 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / 2.75;
                    7.5625 * t * t + 0.984375
                }
            }
            EasingFunction::Elastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    let p = 0.3;
                    let s = p / 4.0;
                    let t = t - 1.0;
                    -(2.0f32.powf(10.0 * t) * ((t - s) * (2.0 * std::f32::consts::PI) / p).sin())
                }
            }
            EasingFunction::CubicIn => t * t * t,
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingFunction::CubicInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
        }
    }
}

/// Animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// Animation is running
    Running,
    /// Animation is completed
    Completed,
}

/// A tween of a single numeric property.
#[derive(Debug, Clone)]
pub struct Animation {
    property: Property,
    from: f32,
    /// Final value; its unit is reused for intermediate values
    to: StyleValue,
    /// Duration in seconds
    duration: f32,
    /// Elapsed time in seconds
    elapsed: f32,
    easing: EasingFunction,
    state: AnimationState,
}

impl Animation {
    pub fn new(property: Property, from: f32, to: StyleValue) -> Self {
        Self {
            property,
            from,
            to,
            duration: 1.0,
            elapsed: 0.0,
            easing: EasingFunction::Linear,
            state: AnimationState::Running,
        }
    }

    /// Set the duration in seconds.
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Current interpolated value.
    pub fn value(&self) -> StyleValue {
        if self.state == AnimationState::Completed {
            return self.to.clone();
        }

        let Some(to) = self.to.as_f32() else {
            return self.to.clone();
        };

        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased_t = self.easing.apply(t);

        self.to.with_f32(self.from + (to - self.from) * eased_t)
    }

    /// Advance by `delta_time` seconds.
    ///
    /// Returns true if the animation is still running.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if self.state == AnimationState::Completed {
            return false;
        }

        self.elapsed += delta_time;

        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = AnimationState::Completed;
            return false;
        }

        true
    }
}

/// One `animate` call: the tweens it still owns plus its completion.
struct Transition {
    node: NodeId,
    animations: Vec<Animation>,
    /// Seconds
    duration: f32,
    elapsed: f32,
    on_complete: Option<Completion>,
}

#[derive(Default)]
struct Transitions {
    running: IndexMap<u64, Transition>,
    next_id: u64,
}

/// [`Animator`] that tweens inline styles through a [`Dom`].
///
/// Transitions are advanced only by [`AnimationSystem::update`], so
/// completions always fire from the frame loop, never from inside
/// `animate`. When a new transition targets a property another transition
/// of the same node is animating, the newer one takes the property over;
/// the older transition keeps its clock and still completes exactly once.
pub struct AnimationSystem {
    dom: Rc<dyn Dom>,
    transitions: RefCell<Transitions>,
}

impl AnimationSystem {
    pub fn new(dom: Rc<dyn Dom>) -> Self {
        Self {
            dom,
            transitions: RefCell::new(Transitions::default()),
        }
    }

    /// Number of transitions that have not completed yet.
    pub fn active_count(&self) -> usize {
        self.transitions.borrow().running.len()
    }

    pub fn is_animating(&self, node: NodeId) -> bool {
        self.transitions
            .borrow()
            .running
            .values()
            .any(|t| t.node == node)
    }

    /// Advance every transition by `delta_time` seconds, write the new
    /// values and fire the completions of transitions that finished.
    pub fn update(&self, delta_time: f32) {
        profile_function!();

        let mut writes = Vec::new();
        let mut finished = Vec::new();

        {
            let mut transitions = self.transitions.borrow_mut();
            transitions.running.retain(|_, transition| {
                transition.elapsed += delta_time;
                for animation in &mut transition.animations {
                    animation.update(delta_time);
                    writes.push((transition.node, animation.property(), animation.value()));
                }

                if transition.elapsed >= transition.duration {
                    finished.extend(transition.on_complete.take());
                    false
                } else {
                    true
                }
            });
        }

        for (node, property, value) in writes {
            self.dom.set_css(node, property, &value);
        }

        for on_complete in finished {
            on_complete();
        }
    }

    /// Jump every transition to its end and fire all completions,
    /// including those of transitions started by the completions themselves.
    pub fn finish_all(&self) {
        loop {
            let remaining = self
                .transitions
                .borrow()
                .running
                .values()
                .map(|t| t.duration - t.elapsed)
                .fold(None, |acc: Option<f32>, r| Some(acc.map_or(r, |a| a.max(r))));

            match remaining {
                Some(remaining) => self.update(remaining.max(0.0)),
                None => break,
            }
        }
    }

    /// Starting value of a tween on `property`.
    fn current_value(&self, node: NodeId, property: Property) -> f32 {
        if let Some(value) = self.dom.css(node, property).as_f32() {
            return value;
        }
        match property {
            Property::Opacity | Property::Scale => 1.0,
            Property::Width => self.dom.outer_size(node).width,
            Property::Height => self.dom.outer_size(node).height,
            _ => 0.0,
        }
    }
}

impl Animator for AnimationSystem {
    fn animate(
        &self,
        node: NodeId,
        target: Style,
        options: AnimateOptions,
        on_complete: Completion,
    ) {
        let easing = EasingFunction::from_name(&options.easing).unwrap_or_else(|| {
            tracing::warn!(easing = %options.easing, "unknown easing, falling back to linear");
            EasingFunction::Linear
        });
        let duration = options.duration.as_secs_f32();

        let mut animations = Vec::new();
        for (property, value) in target.iter() {
            if property.is_animatable() && value.as_f32().is_some() {
                let from = self.current_value(node, property);
                animations.push(
                    Animation::new(property, from, value.clone())
                        .duration(duration)
                        .easing(easing),
                );
            } else {
                // Nothing to interpolate; jump straight to the target.
                self.dom.set_css(node, property, value);
            }
        }

        let mut transitions = self.transitions.borrow_mut();
        for transition in transitions.running.values_mut() {
            if transition.node == node {
                transition
                    .animations
                    .retain(|a| !target.contains(a.property()));
            }
        }

        let id = transitions.next_id;
        transitions.next_id += 1;
        tracing::trace!(node = %node, id, tweens = animations.len(), "transition started");

        transitions.running.insert(
            id,
            Transition {
                node,
                animations,
                duration,
                elapsed: 0.0,
                on_complete: Some(on_complete),
            },
        );
    }
}

impl std::fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("active", &self.active_count())
            .finish()
    }
}
