//! Target geometry of a window.

use lumen_core::{Dom, NodeId, Property, Size, Style, StyleValue};

use super::options::{Offset, WindowOptions};

/// Where a window ends up once its animation completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Outer box measured with the requested width/height applied
    pub size: Size<f32>,
    pub left: StyleValue,
    pub top: StyleValue,
}

impl Placement {
    /// Box properties to animate towards.
    pub fn target_style(&self) -> Style {
        Style::new()
            .with(Property::Width, StyleValue::Px(self.size.width))
            .with(Property::Height, StyleValue::Px(self.size.height))
            .with(Property::Left, self.left.clone())
            .with(Property::Top, self.top.clone())
    }
}

/// Left offset that centers `outer_width` in the viewport, never negative.
pub fn horizontal_center(viewport_width: f32, outer_width: f32) -> f32 {
    ((viewport_width - outer_width) / 2.0).max(0.0)
}

/// Top offset placing the window two fifths of the free space down, never
/// negative. Dialogs sit above the true vertical center.
pub fn vertical_bias(viewport_height: f32, outer_height: f32) -> f32 {
    ((viewport_height - outer_height) * 2.0 / 5.0).max(0.0)
}

/// Resolve `left`/`top` for a box of `outer` size inside `viewport`.
pub fn resolve_offsets(
    viewport: Size<f32>,
    outer: Size<f32>,
    left: &Offset,
    top: &Offset,
) -> (StyleValue, StyleValue) {
    let left = left
        .literal()
        .unwrap_or_else(|| StyleValue::Px(horizontal_center(viewport.width, outer.width)));
    let top = top
        .literal()
        .unwrap_or_else(|| StyleValue::Px(vertical_bias(viewport.height, outer.height)));
    (left, top)
}

/// Compute the placement of `node` for `options`.
///
/// The requested width/height are applied only long enough to read the
/// outer box; the node's previous inline width/height are restored before
/// returning.
pub fn measure(dom: &dyn Dom, node: NodeId, options: &WindowOptions) -> Placement {
    let viewport = dom.viewport_size();
    let previous = dom.css_many(node, &[Property::Width, Property::Height]);

    dom.apply(
        node,
        &Style::new()
            .with(Property::Width, options.width.to_style_value())
            .with(Property::Height, options.height.to_style_value()),
    );
    let size = dom.outer_size(node);
    dom.apply(node, &previous);

    let (left, top) = resolve_offsets(viewport, size, &options.left, &options.top);
    Placement { size, left, top }
}
