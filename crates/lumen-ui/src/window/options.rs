//! Window configuration.

use std::time::Duration;

use lumen_core::{NodeId, StyleValue};

/// Width or height of a window.
///
/// # Examples
/// ```
/// use lumen_ui::Dimension;
///
/// assert_eq!(Dimension::from(320.0), Dimension::Px(320.0));
/// assert_eq!(Dimension::from("auto"), Dimension::Auto);
/// assert_eq!(Dimension::from("40em"), Dimension::Css("40em".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Fixed pixel value
    Px(f32),
    /// Any CSS length (`50%`, `30em`, `80vw`)
    Css(String),
    /// Sized by content
    Auto,
}

impl Dimension {
    pub fn to_style_value(&self) -> StyleValue {
        match self {
            Dimension::Px(v) => StyleValue::Px(*v),
            Dimension::Css(css) => StyleValue::Keyword(css.clone()),
            Dimension::Auto => StyleValue::keyword("auto"),
        }
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Dimension::Px(value)
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Px(value as f32)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        match StyleValue::parse(value) {
            StyleValue::Px(v) | StyleValue::Number(v) => Dimension::Px(v),
            StyleValue::Keyword(k) if k == "auto" => Dimension::Auto,
            StyleValue::Keyword(k) => Dimension::Css(k),
            StyleValue::Unset => Dimension::Auto,
        }
    }
}

/// Horizontal or vertical placement of a window.
#[derive(Debug, Clone, PartialEq)]
pub enum Offset {
    /// Centered horizontally; biased towards the top vertically
    Center,
    /// Fixed pixel offset
    Px(f32),
    /// Any CSS offset, used verbatim
    Css(String),
}

impl Offset {
    /// Style value for a non-centered offset.
    pub fn literal(&self) -> Option<StyleValue> {
        match self {
            Offset::Center => None,
            Offset::Px(v) => Some(StyleValue::Px(*v)),
            Offset::Css(css) => Some(StyleValue::Keyword(css.clone())),
        }
    }
}

impl From<f32> for Offset {
    fn from(value: f32) -> Self {
        Offset::Px(value)
    }
}

impl From<f64> for Offset {
    fn from(value: f64) -> Self {
        Offset::Px(value as f32)
    }
}

impl From<&str> for Offset {
    fn from(value: &str) -> Self {
        match StyleValue::parse(value) {
            StyleValue::Px(v) | StyleValue::Number(v) => Offset::Px(v),
            StyleValue::Keyword(k) if k == "center" => Offset::Center,
            StyleValue::Keyword(k) => Offset::Css(k),
            StyleValue::Unset => Offset::Center,
        }
    }
}

/// Options snapshot held by a [`Window`](super::Window).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    /// Mount point; `None` mounts under the document body
    pub parent_node: Option<NodeId>,
    pub width: Dimension,
    pub height: Dimension,
    pub left: Offset,
    pub top: Offset,
    /// Duration of open, close and resize animations
    pub duration: Duration,
    /// Easing name handed to the animator
    pub easing: String,
    /// Extra whitespace-separated classes for the window node
    pub add_class: String,
    /// Pinned stacking index. `None` or `Some(0)` allocates one per `open`.
    pub z_index: Option<u32>,
    /// Emit `"resize"` after the `"open"` a finished resize emits
    pub emit_resize_event: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            parent_node: None,
            width: Dimension::Px(500.0),
            height: Dimension::Auto,
            left: Offset::Center,
            top: Offset::Center,
            duration: Duration::from_millis(456),
            easing: "ease-in-out-back".to_string(),
            add_class: String::new(),
            z_index: None,
            emit_resize_event: false,
        }
    }
}

impl WindowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent_node(mut self, node: NodeId) -> Self {
        self.parent_node = Some(node);
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = height.into();
        self
    }

    pub fn left(mut self, left: impl Into<Offset>) -> Self {
        self.left = left.into();
        self
    }

    pub fn top(mut self, top: impl Into<Offset>) -> Self {
        self.top = top.into();
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn add_class(mut self, classes: impl Into<String>) -> Self {
        self.add_class = classes.into();
        self
    }

    pub fn z_index(mut self, z_index: u32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn emit_resize_event(mut self, emit: bool) -> Self {
        self.emit_resize_event = emit;
        self
    }

    /// The pinned stacking index, treating 0 as "not pinned".
    pub fn pinned_z_index(&self) -> Option<u32> {
        self.z_index.filter(|z| *z != 0)
    }
}

/// Geometry overlay accepted by [`Window::resize`](super::Window::resize).
///
/// Fields left at `None` keep the window's current option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeOptions {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub left: Option<Offset>,
    pub top: Option<Offset>,
}

impl ResizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn left(mut self, left: impl Into<Offset>) -> Self {
        self.left = Some(left.into());
        self
    }

    pub fn top(mut self, top: impl Into<Offset>) -> Self {
        self.top = Some(top.into());
        self
    }

    /// Overlay the set fields onto `options`.
    pub fn apply_to(&self, options: &mut WindowOptions) {
        if let Some(width) = &self.width {
            options.width = width.clone();
        }
        if let Some(height) = &self.height {
            options.height = height.clone();
        }
        if let Some(left) = &self.left {
            options.left = left.clone();
        }
        if let Some(top) = &self.top {
            options.top = top.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WindowOptions::default();
        assert_eq!(options.width, Dimension::Px(500.0));
        assert_eq!(options.height, Dimension::Auto);
        assert_eq!(options.left, Offset::Center);
        assert_eq!(options.top, Offset::Center);
        assert_eq!(options.duration, Duration::from_millis(456));
        assert_eq!(options.easing, "ease-in-out-back");
        assert!(options.add_class.is_empty());
        assert_eq!(options.z_index, None);
        assert!(!options.emit_resize_event);
    }

    #[test]
    fn test_offset_parsing() {
        assert_eq!(Offset::from("center"), Offset::Center);
        assert_eq!(Offset::from("24px"), Offset::Px(24.0));
        assert_eq!(Offset::from("10%"), Offset::Css("10%".into()));
    }

    #[test]
    fn test_zero_z_index_is_not_pinned() {
        assert_eq!(WindowOptions::new().z_index(0).pinned_z_index(), None);
        assert_eq!(WindowOptions::new().z_index(7).pinned_z_index(), Some(7));
    }

    #[test]
    fn test_resize_overlays_only_set_fields() {
        let mut options = WindowOptions::new().height(300.0).left(12.0);
        ResizeOptions::new().width(600.0).apply_to(&mut options);

        assert_eq!(options.width, Dimension::Px(600.0));
        assert_eq!(options.height, Dimension::Px(300.0));
        assert_eq!(options.left, Offset::Px(12.0));
        assert_eq!(options.top, Offset::Center);
    }
}
