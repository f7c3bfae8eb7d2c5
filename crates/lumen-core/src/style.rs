//! Inline style values exchanged with the DOM and animation collaborators.

use std::fmt;

use crate::alloc::IndexMap;

/// Style properties a widget reads, writes or animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Width,
    Height,
    Left,
    Top,
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Uniform scale, rendered as `transform: scale(n)`
    Scale,
    /// Raw transform; only ever reset through [`StyleValue::Unset`]
    Transform,
    Visibility,
    Display,
    Position,
    ZIndex,
}

impl Property {
    /// The CSS property name this maps to.
    pub fn css_name(&self) -> &'static str {
        match self {
            Property::Width => "width",
            Property::Height => "height",
            Property::Left => "left",
            Property::Top => "top",
            Property::Opacity => "opacity",
            Property::Scale | Property::Transform => "transform",
            Property::Visibility => "visibility",
            Property::Display => "display",
            Property::Position => "position",
            Property::ZIndex => "z-index",
        }
    }

    /// Whether values of this property are numbers that can be tweened.
    pub fn is_animatable(&self) -> bool {
        matches!(
            self,
            Property::Width
                | Property::Height
                | Property::Left
                | Property::Top
                | Property::Opacity
                | Property::Scale
        )
    }
}

/// A single inline style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Pixel length
    Px(f32),
    /// Unitless number (opacity, scale, z-index)
    Number(f32),
    /// Any other CSS token: `auto`, `none`, `50%`, `visible`, ...
    Keyword(String),
    /// No inline value; the stylesheet decides
    Unset,
}

impl StyleValue {
    pub fn keyword(value: impl Into<String>) -> Self {
        StyleValue::Keyword(value.into())
    }

    /// Numeric payload of `Px` and `Number` values.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            StyleValue::Px(v) | StyleValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, StyleValue::Unset)
    }

    /// Same unit as `self`, carrying `value`. Non-numeric values are
    /// returned unchanged.
    pub fn with_f32(&self, value: f32) -> Self {
        match self {
            StyleValue::Px(_) => StyleValue::Px(value),
            StyleValue::Number(_) => StyleValue::Number(value),
            other => other.clone(),
        }
    }

    /// Parse an inline CSS value as the DOM reports it.
    ///
    /// ```
    /// use lumen_core::StyleValue;
    ///
    /// assert_eq!(StyleValue::parse("120px"), StyleValue::Px(120.0));
    /// assert_eq!(StyleValue::parse("0.5"), StyleValue::Number(0.5));
    /// assert_eq!(StyleValue::parse("auto"), StyleValue::keyword("auto"));
    /// assert_eq!(StyleValue::parse("  "), StyleValue::Unset);
    /// ```
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return StyleValue::Unset;
        }
        if let Some(px) = input.strip_suffix("px") {
            if let Ok(v) = px.trim().parse::<f32>() {
                return StyleValue::Px(v);
            }
        }
        match input.parse::<f32>() {
            Ok(v) => StyleValue::Number(v),
            Err(_) => StyleValue::Keyword(input.to_string()),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(v) => write!(f, "{}px", v),
            StyleValue::Number(v) => write!(f, "{}", v),
            StyleValue::Keyword(k) => f.write_str(k),
            StyleValue::Unset => Ok(()),
        }
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Px(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Px(value as f32)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::parse(value)
    }
}

/// An ordered set of property assignments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    values: IndexMap<Property, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, property: Property, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: impl Into<StyleValue>) {
        self.values.insert(property, value.into());
    }

    pub fn get(&self, property: Property) -> Option<&StyleValue> {
        self.values.get(&property)
    }

    pub fn remove(&mut self, property: Property) -> Option<StyleValue> {
        self.values.shift_remove(&property)
    }

    pub fn contains(&self, property: Property) -> bool {
        self.values.contains_key(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &StyleValue)> {
        self.values.iter().map(|(p, v)| (*p, v))
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; later values win.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in other.iter() {
            self.values.insert(property, value.clone());
        }
    }
}

impl FromIterator<(Property, StyleValue)> for Style {
    fn from_iter<I: IntoIterator<Item = (Property, StyleValue)>>(iter: I) -> Self {
        Style {
            values: iter.into_iter().collect(),
        }
    }
}
