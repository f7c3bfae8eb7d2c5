use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lumen_core::profiling::profile_function;
use lumen_core::{
    AnimateOptions, Completion, Emitter, EventSource, InsertPosition, NodeId, Property, Style,
    StyleValue,
};

use super::error::{WindowError, WindowResult};
use super::options::{ResizeOptions, WindowOptions};
use super::placement::measure;
use crate::context::UiContext;
use crate::stacking::WindowId;

/// Class carried by every window node.
pub const WINDOW_CLASS: &str = "lumen-window";

/// What a [`Window`] displays.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Node(NodeId),
    /// Resolved to its first match at construction
    Selector(String),
}

impl From<NodeId> for Content {
    fn from(node: NodeId) -> Self {
        Content::Node(node)
    }
}

impl From<&str> for Content {
    fn from(selector: &str) -> Self {
        Content::Selector(selector.to_string())
    }
}

impl From<String> for Content {
    fn from(selector: String) -> Self {
        Content::Selector(selector)
    }
}

/// Lifecycle of a [`Window`].
///
/// ```text
/// Closed --open--> Opening --done--> Open
///   ^                 |               |
///   |               close           close
///   |                 v               |
///   +-----done---- Closing <----------+
///
/// any --destroy--> Destroyed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
    Destroyed,
}

impl WindowState {
    /// Request state: true from the start of `open` until the start of `close`.
    pub fn is_visible(&self) -> bool {
        matches!(self, WindowState::Opening | WindowState::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEventKind {
    Open,
    Close,
    Resize,
}

impl WindowEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowEventKind::Open => "open",
            WindowEventKind::Close => "close",
            WindowEventKind::Resize => "resize",
        }
    }
}

/// Payload of the lifecycle events a [`Window`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEvent {
    pub window: WindowId,
    pub kind: WindowEventKind,
}

/// Caller callback run after a transition completes.
pub type WindowCallback = Box<dyn FnOnce(&Window)>;

struct Inner {
    options: WindowOptions,
    state: WindowState,
    /// Set once `destroy` has been requested on a visible window
    destroying: bool,
}

struct Shared {
    id: WindowId,
    ctx: UiContext,
    events: Emitter<WindowEvent>,
    window_node: NodeId,
    content_node: NodeId,
    placeholder: NodeId,
    inner: RefCell<Inner>,
}

/// Floating overlay panel around a content node.
///
/// `Window` is a cheap handle; clones refer to the same widget. Operations
/// that do not apply in the current state are no-ops that return the window,
/// so calls can be chained without checking state first.
///
/// Lifecycle events (`"open"`, `"close"` and optionally `"resize"`) are
/// emitted once the animator reports completion, before the caller's
/// callback runs.
#[derive(Clone)]
pub struct Window {
    shared: Rc<Shared>,
}

impl Window {
    /// Build a window around `content` and mount it, hidden, under
    /// `options.parent_node` (or the document body).
    ///
    /// The content node is moved into the window node; a placeholder marks
    /// its original location until [`Window::destroy`].
    pub fn new(
        ctx: &UiContext,
        content: impl Into<Content>,
        options: WindowOptions,
    ) -> WindowResult<Self> {
        profile_function!();
        let dom = ctx.dom();

        let content_node = match content.into() {
            Content::Node(node) => node,
            Content::Selector(selector) => match dom.query(&selector).first() {
                Some(node) => *node,
                None => return Err(WindowError::ContentNotFound(selector)),
            },
        };

        let Some(window_node) = dom.create_element("div") else {
            return Err(WindowError::ElementCreation("div".to_string()));
        };
        let Some(placeholder) = dom.create_element("div") else {
            dom.remove(window_node);
            return Err(WindowError::ElementCreation("div".to_string()));
        };

        let id = ctx.ids().next();
        dom.set_attribute(window_node, "id", &format!("{WINDOW_CLASS}-{id}"));
        dom.add_class(window_node, WINDOW_CLASS);
        dom.apply(
            window_node,
            &Style::new()
                .with(Property::Display, "none")
                .with(Property::Position, "absolute"),
        );
        dom.add_class(window_node, &options.add_class);

        let parent = options.parent_node.unwrap_or_else(|| dom.body());
        dom.insert(window_node, parent, InsertPosition::Append);

        dom.insert(placeholder, content_node, InsertPosition::AfterEnd);
        dom.insert(content_node, window_node, InsertPosition::Append);

        tracing::debug!(id, node = %window_node, content = %content_node, "window created");

        Ok(Self {
            shared: Rc::new(Shared {
                id,
                events: Emitter::with_capacity(ctx.max_listeners()),
                ctx: ctx.clone(),
                window_node,
                content_node,
                placeholder,
                inner: RefCell::new(Inner {
                    options,
                    state: WindowState::Closed,
                    destroying: false,
                }),
            }),
        })
    }

    pub fn id(&self) -> WindowId {
        self.shared.id
    }

    /// The window node owned by this widget.
    pub fn get_node(&self) -> NodeId {
        self.shared.window_node
    }

    pub fn content_node(&self) -> NodeId {
        self.shared.content_node
    }

    pub fn state(&self) -> WindowState {
        self.shared.inner.borrow().state
    }

    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// Snapshot of the current options.
    pub fn options(&self) -> WindowOptions {
        self.shared.inner.borrow().options.clone()
    }

    pub fn open(&self) -> &Self {
        self.open_inner(None)
    }

    /// Like [`Window::open`], running `callback` after `"open"` is emitted.
    pub fn open_with(&self, callback: impl FnOnce(&Window) + 'static) -> &Self {
        self.open_inner(Some(Box::new(callback)))
    }

    /// Animate to the geometry of the current options overlaid with `size`.
    pub fn resize(&self, size: Option<ResizeOptions>) -> &Self {
        self.resize_inner(size, None)
    }

    pub fn resize_with(
        &self,
        size: Option<ResizeOptions>,
        callback: impl FnOnce(&Window) + 'static,
    ) -> &Self {
        self.resize_inner(size, Some(Box::new(callback)))
    }

    pub fn close(&self) -> &Self {
        self.close_inner(None)
    }

    pub fn close_with(&self, callback: impl FnOnce(&Window) + 'static) -> &Self {
        self.close_inner(Some(Box::new(callback)))
    }

    /// Tear the window down, closing it first when visible.
    ///
    /// The content node goes back to where it was before construction and
    /// the window node is removed. Every later operation is a no-op.
    pub fn destroy(&self) {
        let visible = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.state == WindowState::Destroyed || inner.destroying {
                tracing::debug!(id = self.shared.id, "destroy ignored, already destroyed");
                return;
            }
            inner.destroying = true;
            inner.state.is_visible()
        };

        if visible {
            self.start_close(Some(Box::new(|window: &Window| window.teardown())));
        } else {
            self.teardown();
        }
    }

    fn open_inner(&self, callback: Option<WindowCallback>) -> &Self {
        profile_function!();
        let options = {
            let inner = self.shared.inner.borrow();
            if !self.accepts(&inner, "open") || inner.state.is_visible() {
                return self;
            }
            inner.options.clone()
        };

        let dom = self.shared.ctx.dom();
        let node = self.shared.window_node;
        let placement = measure(dom, node, &options);
        let z_index = options
            .pinned_z_index()
            .unwrap_or_else(|| self.shared.ctx.stacking().next());

        dom.apply(
            node,
            &Style::new()
                .with(Property::Display, "block")
                .with(Property::Visibility, "visible")
                .with(Property::Opacity, StyleValue::Number(0.0))
                .with(Property::Scale, StyleValue::Number(0.0))
                .with(Property::Left, placement.left.clone())
                .with(Property::Top, placement.top.clone())
                .with(Property::ZIndex, StyleValue::Number(z_index as f32)),
        );

        self.shared.inner.borrow_mut().state = WindowState::Opening;
        tracing::debug!(id = self.shared.id, z_index, "window opening");

        let mut target = placement.target_style();
        target.set(Property::Opacity, StyleValue::Number(1.0));
        target.set(Property::Scale, StyleValue::Number(1.0));

        let window = self.clone();
        self.animate(
            target,
            &options,
            Box::new(move || {
                window.settle(WindowState::Opening, WindowState::Open);
                window.emit_lifecycle(WindowEventKind::Open);
                if let Some(callback) = callback {
                    callback(&window);
                }
            }),
        );
        self
    }

    fn resize_inner(&self, size: Option<ResizeOptions>, callback: Option<WindowCallback>) -> &Self {
        profile_function!();
        let options = {
            let mut inner = self.shared.inner.borrow_mut();
            if !self.accepts(&inner, "resize") || !inner.state.is_visible() {
                return self;
            }
            if let Some(size) = &size {
                size.apply_to(&mut inner.options);
            }
            inner.options.clone()
        };

        let placement = measure(self.shared.ctx.dom(), self.shared.window_node, &options);
        tracing::debug!(id = self.shared.id, size = ?placement.size, "window resizing");

        let emit_resize = options.emit_resize_event;
        let window = self.clone();
        self.animate(
            placement.target_style(),
            &options,
            Box::new(move || {
                window.emit_lifecycle(WindowEventKind::Open);
                if emit_resize {
                    window.emit_lifecycle(WindowEventKind::Resize);
                }
                if let Some(callback) = callback {
                    callback(&window);
                }
            }),
        );
        self
    }

    fn close_inner(&self, callback: Option<WindowCallback>) -> &Self {
        {
            let inner = self.shared.inner.borrow();
            if !self.accepts(&inner, "close") || !inner.state.is_visible() {
                return self;
            }
        }
        self.start_close(callback);
        self
    }

    /// Close sequence shared by `close` and `destroy`; the caller checked
    /// that the window is visible.
    fn start_close(&self, callback: Option<WindowCallback>) {
        profile_function!();
        let options = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.state = WindowState::Closing;
            inner.options.clone()
        };
        tracing::debug!(id = self.shared.id, "window closing");

        let target = Style::new()
            .with(Property::Opacity, StyleValue::Number(0.0))
            .with(Property::Scale, StyleValue::Number(0.0));

        let window = self.clone();
        self.animate(
            target,
            &options,
            Box::new(move || {
                let closed = window.settle(WindowState::Closing, WindowState::Closed);
                window.emit_lifecycle(WindowEventKind::Close);
                // A "close" listener may have opened the window again.
                if closed && window.state() == WindowState::Closed {
                    window.shared.ctx.dom().apply(
                        window.shared.window_node,
                        &Style::new()
                            .with(Property::Transform, StyleValue::Unset)
                            .with(Property::Display, "none"),
                    );
                }
                if let Some(callback) = callback {
                    callback(&window);
                }
            }),
        );
    }

    fn teardown(&self) {
        let dom = self.shared.ctx.dom();
        dom.insert(
            self.shared.content_node,
            self.shared.placeholder,
            InsertPosition::AfterEnd,
        );
        dom.remove(self.shared.placeholder);
        dom.remove(self.shared.window_node);

        self.shared.inner.borrow_mut().state = WindowState::Destroyed;
        tracing::debug!(id = self.shared.id, "window destroyed");
    }

    /// Whether an operation may run. Destroyed windows and windows with a
    /// pending destroy accept nothing.
    fn accepts(&self, inner: &Inner, operation: &str) -> bool {
        if inner.state == WindowState::Destroyed || inner.destroying {
            tracing::debug!(id = self.shared.id, operation, "ignored on destroyed window");
            return false;
        }
        true
    }

    /// Move from `from` to `to` if no other transition took over meanwhile.
    fn settle(&self, from: WindowState, to: WindowState) -> bool {
        let mut inner = self.shared.inner.borrow_mut();
        if inner.state != from {
            return false;
        }
        inner.state = to;
        true
    }

    fn animate(&self, target: Style, options: &WindowOptions, on_complete: Completion) {
        self.shared.ctx.animator().animate(
            self.shared.window_node,
            target,
            AnimateOptions::new(options.duration, options.easing.clone()),
            on_complete,
        );
    }

    fn emit_lifecycle(&self, kind: WindowEventKind) {
        if self.state() == WindowState::Destroyed {
            return;
        }
        let event = WindowEvent {
            window: self.shared.id,
            kind,
        };
        if let Err(err) = self.shared.events.emit(kind.as_str(), &event) {
            tracing::warn!(id = self.shared.id, event = kind.as_str(), "listener failed: {}", err);
        }
    }
}

impl EventSource<WindowEvent> for Window {
    fn emitter(&self) -> &Emitter<WindowEvent> {
        &self.shared.events
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.borrow();
        f.debug_struct("Window")
            .field("id", &self.shared.id)
            .field("node", &self.shared.window_node)
            .field("content", &self.shared.content_node)
            .field("state", &inner.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_states() {
        assert!(!WindowState::Closed.is_visible());
        assert!(WindowState::Opening.is_visible());
        assert!(WindowState::Open.is_visible());
        assert!(!WindowState::Closing.is_visible());
        assert!(!WindowState::Destroyed.is_visible());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(WindowEventKind::Open.as_str(), "open");
        assert_eq!(WindowEventKind::Close.as_str(), "close");
        assert_eq!(WindowEventKind::Resize.as_str(), "resize");
    }

    #[test]
    fn test_content_from_selector() {
        assert_eq!(Content::from("#dialog"), Content::Selector("#dialog".into()));
        assert_eq!(Content::from(NodeId(3)), Content::Node(NodeId(3)));
    }
}
