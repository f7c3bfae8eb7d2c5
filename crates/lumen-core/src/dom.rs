//! DOM access contract.
//!
//! Widgets never touch a document directly; they go through [`Dom`], which a
//! browser backend (`lumen_ui::web::WebDom`) or a test double implements.
//! Nodes are referred to by opaque [`NodeId`] handles owned by the backend.

use std::fmt;

use crate::alloc::HashMap;
use crate::geometry::Size;
use crate::style::{Property, Style, StyleValue};

/// Opaque handle to a node known to a [`Dom`] backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where [`Dom::insert`] places a node relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Last child of the target
    Append,
    /// Next sibling of the target
    AfterEnd,
}

/// Operations a widget needs from the document.
///
/// All methods take `&self`; backends use interior mutability. Unknown
/// handles are ignored by mutating methods and read back as empty values.
pub trait Dom {
    /// Default mount point for widgets.
    fn body(&self) -> NodeId;

    /// Size of the visible viewport.
    fn viewport_size(&self) -> Size<f32>;

    /// All elements matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<NodeId>;

    /// Create a detached element, or `None` if the document refused.
    fn create_element(&self, tag: &str) -> Option<NodeId>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    /// Add each whitespace-separated class in `classes`.
    fn add_class(&self, node: NodeId, classes: &str);

    /// Move `node` to `position` relative to `target`, detaching it first.
    fn insert(&self, node: NodeId, target: NodeId, position: InsertPosition);

    /// Detach `node` from the document. Backends may release the handle,
    /// after which `node` is unknown.
    fn remove(&self, node: NodeId);

    /// Inline value of `property`.
    fn css(&self, node: NodeId, property: Property) -> StyleValue;

    fn set_css(&self, node: NodeId, property: Property, value: &StyleValue);

    /// Rendered size including padding and border.
    fn outer_size(&self, node: NodeId) -> Size<f32>;

    /// Read several properties at once.
    fn css_many(&self, node: NodeId, properties: &[Property]) -> Style {
        properties
            .iter()
            .map(|p| (*p, self.css(node, *p)))
            .collect()
    }

    /// Write every assignment of `style`, in order.
    fn apply(&self, node: NodeId, style: &Style) {
        for (property, value) in style.iter() {
            self.set_css(node, property, value);
        }
    }
}

/// Handle table for [`Dom`] backends that map [`NodeId`]s to native nodes.
///
/// Ids come from a counter and are never handed out twice, so a released
/// handle stays unknown instead of aliasing a newer node.
#[derive(Debug)]
pub struct NodeRegistry<T> {
    nodes: HashMap<NodeId, T>,
    next: u64,
}

impl<T> Default for NodeRegistry<T> {
    fn default() -> Self {
        Self {
            nodes: HashMap::default(),
            next: 0,
        }
    }
}

impl<T> NodeRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: T) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(id, node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(&id)
    }

    /// Release `id`, returning its node.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.nodes.remove(&id)
    }

    /// First live handle whose node satisfies `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<NodeId> {
        self.nodes
            .iter()
            .find_map(|(id, node)| predicate(node).then_some(*id))
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_releases_handles() {
        let mut registry = NodeRegistry::new();
        let body = registry.insert("body");
        let panel = registry.insert("div");
        assert_eq!(body, NodeId(0));
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.remove(panel), Some("div"));
        assert_eq!(registry.get(panel), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.remove(panel), None);
    }

    #[test]
    fn test_registry_never_reuses_ids() {
        let mut registry = NodeRegistry::new();
        let first = registry.insert("div");
        registry.remove(first);
        let second = registry.insert("span");

        assert_ne!(first, second);
        assert_eq!(registry.get(first), None);
        assert_eq!(registry.get(second), Some(&"span"));
    }

    #[test]
    fn test_registry_find() {
        let mut registry = NodeRegistry::new();
        registry.insert("p");
        let aside = registry.insert("aside");

        assert_eq!(registry.find(|tag| *tag == "aside"), Some(aside));
        assert_eq!(registry.find(|tag| *tag == "table"), None);
    }
}
