//! In-memory implementation of [`Dom`] for testing.
//!
//! The mock keeps a small element tree with attributes, classes and inline
//! styles, and records every mutating call.

use lumen_core::alloc::HashMap;
use lumen_core::{Dom, InsertPosition, NodeId, Property, Size, StyleValue};
use parking_lot::Mutex;

/// Records a mutating DOM call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCall {
    CreateElement {
        node: NodeId,
        tag: String,
    },
    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },
    AddClass {
        node: NodeId,
        classes: String,
    },
    Insert {
        node: NodeId,
        target: NodeId,
        position: InsertPosition,
    },
    Remove {
        node: NodeId,
    },
    SetCss {
        node: NodeId,
        property: Property,
        value: StyleValue,
    },
}

#[derive(Debug, Default)]
struct MockNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    /// Inline styles keyed by CSS name, so `Scale` and `Transform` share a slot
    styles: HashMap<&'static str, StyleValue>,
    /// Content size used when width/height are not fixed in pixels
    intrinsic: Size<f32>,
    /// Padding plus border added to the content box
    box_extra: Size<f32>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<MockNode>,
    viewport: Size<f32>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Option<&MockNode> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MockNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn push(&mut self, tag: &str) -> NodeId {
        self.nodes.push(MockNode {
            tag: tag.to_string(),
            ..Default::default()
        });
        NodeId(self.nodes.len() as u64 - 1)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn attach(&mut self, id: NodeId, parent: NodeId, index: usize) {
        if let Some(node) = self.node_mut(id) {
            node.parent = Some(parent);
        }
        if let Some(parent) = self.node_mut(parent) {
            let index = index.min(parent.children.len());
            parent.children.insert(index, id);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.node(id).and_then(|n| n.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if let Some(id_attr) = selector.strip_prefix('#') {
            node.attributes.get("id").is_some_and(|v| v == id_attr)
        } else if let Some(class) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        } else {
            node.tag.eq_ignore_ascii_case(selector)
        }
    }

    /// Attached nodes in document order.
    fn walk(&self, from: NodeId, out: &mut Vec<NodeId>) {
        out.push(from);
        if let Some(node) = self.node(from) {
            for child in &node.children {
                self.walk(*child, out);
            }
        }
    }
}

/// Mock implementation of [`Dom`] for testing.
///
/// Node `#0` is the body. The viewport defaults to 1000x800 and elements
/// have no intrinsic size until [`MockDom::set_intrinsic_size`] is called.
///
/// # Example
///
/// ```rust
/// use lumen_core::{Dom, Size};
/// use lumen_test_utils::MockDom;
///
/// let dom = MockDom::new();
/// let content = dom.append_element(dom.body(), "section");
/// dom.set_intrinsic_size(content, Size::new(320.0, 120.0));
///
/// assert_eq!(dom.query("section"), vec![content]);
/// assert!(dom.is_attached(content));
/// ```
#[derive(Debug)]
pub struct MockDom {
    tree: Mutex<Tree>,
    /// Recorded calls for verification
    calls: Mutex<Vec<DomCall>>,
    /// Remaining successful `create_element` calls; `None` is unlimited
    creation_budget: Mutex<Option<usize>>,
}

impl MockDom {
    /// Create a document holding only a body.
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            viewport: Size::new(1000.0, 800.0),
        };
        tree.push("body");
        Self {
            tree: Mutex::new(tree),
            calls: Mutex::new(Vec::new()),
            creation_budget: Mutex::new(None),
        }
    }

    /// Let `count` more `create_element` calls succeed, then fail the rest.
    pub fn fail_create_element_after(&self, count: usize) {
        *self.creation_budget.lock() = Some(count);
    }

    pub fn set_viewport(&self, size: Size<f32>) {
        self.tree.lock().viewport = size;
    }

    /// Create an element as last child of `parent` without recording a call.
    pub fn append_element(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut tree = self.tree.lock();
        let id = tree.push(tag);
        let index = tree.node(parent).map_or(0, |p| p.children.len());
        tree.attach(id, parent, index);
        id
    }

    /// Content size of `node` when its width/height are not fixed.
    pub fn set_intrinsic_size(&self, node: NodeId, size: Size<f32>) {
        if let Some(node) = self.tree.lock().node_mut(node) {
            node.intrinsic = size;
        }
    }

    /// Padding plus border of `node`, added to its outer size.
    pub fn set_box_extra(&self, node: NodeId, extra: Size<f32>) {
        if let Some(node) = self.tree.lock().node_mut(node) {
            node.box_extra = extra;
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.lock().node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .lock()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .lock()
            .node(node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.tree
            .lock()
            .node(node)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    /// Whether `node` is reachable from the body.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.tree.lock().is_ancestor(NodeId(0), node)
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<DomCall> {
        self.calls.lock().clone()
    }

    /// Count recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DomCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    /// Values written to `property` of `node`, in order.
    pub fn css_writes(&self, node: NodeId, property: Property) -> Vec<StyleValue> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DomCall::SetCss {
                    node: n,
                    property: p,
                    value,
                } if *n == node && *p == property => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: DomCall) {
        self.calls.lock().push(call);
    }
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MockDom {
    fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn viewport_size(&self) -> Size<f32> {
        self.tree.lock().viewport
    }

    fn query(&self, selector: &str) -> Vec<NodeId> {
        let tree = self.tree.lock();
        let mut order = Vec::new();
        tree.walk(NodeId(0), &mut order);
        order
            .into_iter()
            .filter(|id| tree.matches(*id, selector.trim()))
            .collect()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        if let Some(budget) = self.creation_budget.lock().as_mut() {
            *budget = budget.checked_sub(1)?;
        }
        let node = self.tree.lock().push(tag);
        self.record(DomCall::CreateElement {
            node,
            tag: tag.to_string(),
        });
        Some(node)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.record(DomCall::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
        if let Some(n) = self.tree.lock().node_mut(node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn add_class(&self, node: NodeId, classes: &str) {
        self.record(DomCall::AddClass {
            node,
            classes: classes.to_string(),
        });
        if let Some(n) = self.tree.lock().node_mut(node) {
            for class in classes.split_whitespace() {
                if !n.classes.iter().any(|c| c == class) {
                    n.classes.push(class.to_string());
                }
            }
        }
    }

    fn insert(&self, node: NodeId, target: NodeId, position: InsertPosition) {
        self.record(DomCall::Insert {
            node,
            target,
            position,
        });
        let mut tree = self.tree.lock();
        if tree.node(node).is_none()
            || tree.node(target).is_none()
            || tree.is_ancestor(node, target)
        {
            return;
        }
        match position {
            InsertPosition::Append => {
                tree.detach(node);
                let index = tree.node(target).map_or(0, |t| t.children.len());
                tree.attach(node, target, index);
            }
            InsertPosition::AfterEnd => {
                let Some(parent) = tree.node(target).and_then(|t| t.parent) else {
                    return;
                };
                tree.detach(node);
                let index = tree
                    .node(parent)
                    .and_then(|p| p.children.iter().position(|c| *c == target))
                    .map_or(0, |i| i + 1);
                tree.attach(node, parent, index);
            }
        }
    }

    fn remove(&self, node: NodeId) {
        self.record(DomCall::Remove { node });
        self.tree.lock().detach(node);
    }

    fn css(&self, node: NodeId, property: Property) -> StyleValue {
        self.tree
            .lock()
            .node(node)
            .and_then(|n| n.styles.get(property.css_name()).cloned())
            .unwrap_or(StyleValue::Unset)
    }

    fn set_css(&self, node: NodeId, property: Property, value: &StyleValue) {
        self.record(DomCall::SetCss {
            node,
            property,
            value: value.clone(),
        });
        if let Some(n) = self.tree.lock().node_mut(node) {
            if value.is_unset() {
                n.styles.remove(property.css_name());
            } else {
                n.styles.insert(property.css_name(), value.clone());
            }
        }
    }

    fn outer_size(&self, node: NodeId) -> Size<f32> {
        let tree = self.tree.lock();
        let Some(n) = tree.node(node) else {
            return Size::ZERO;
        };
        let fixed = |property: Property| match n.styles.get(property.css_name()) {
            Some(StyleValue::Px(v)) => Some(*v),
            _ => None,
        };
        Size::new(
            fixed(Property::Width).unwrap_or(n.intrinsic.width) + n.box_extra.width,
            fixed(Property::Height).unwrap_or(n.intrinsic.height) + n.box_extra.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_after_end_keeps_sibling_order() {
        let dom = MockDom::new();
        let a = dom.append_element(dom.body(), "p");
        let b = dom.append_element(dom.body(), "p");
        let c = dom.create_element("span").unwrap();

        dom.insert(c, a, InsertPosition::AfterEnd);
        assert_eq!(dom.children(dom.body()), vec![a, c, b]);
    }

    #[test]
    fn test_move_detaches_from_previous_parent() {
        let dom = MockDom::new();
        let host = dom.append_element(dom.body(), "div");
        let item = dom.append_element(dom.body(), "p");

        dom.insert(item, host, InsertPosition::Append);
        assert_eq!(dom.children(dom.body()), vec![host]);
        assert_eq!(dom.parent(item), Some(host));
    }

    #[test]
    fn test_query_selectors() {
        let dom = MockDom::new();
        let a = dom.append_element(dom.body(), "div");
        let b = dom.append_element(a, "div");
        dom.set_attribute(b, "id", "dialog");
        dom.add_class(a, "panel wide");

        assert_eq!(dom.query("div"), vec![a, b]);
        assert_eq!(dom.query("#dialog"), vec![b]);
        assert_eq!(dom.query(".wide"), vec![a]);
        assert!(dom.query("#missing").is_empty());
    }

    #[test]
    fn test_detached_nodes_are_not_queried() {
        let dom = MockDom::new();
        let node = dom.create_element("aside").unwrap();
        assert!(dom.query("aside").is_empty());
        assert!(!dom.is_attached(node));
    }

    #[test]
    fn test_element_creation_can_fail() {
        let dom = MockDom::new();
        dom.fail_create_element_after(1);

        assert!(dom.create_element("div").is_some());
        assert_eq!(dom.create_element("div"), None);
        assert_eq!(
            dom.count(|call| matches!(call, DomCall::CreateElement { .. })),
            1
        );
    }

    #[test]
    fn test_outer_size() {
        let dom = MockDom::new();
        let node = dom.append_element(dom.body(), "div");
        dom.set_intrinsic_size(node, Size::new(300.0, 120.0));
        dom.set_box_extra(node, Size::new(10.0, 10.0));

        assert_eq!(dom.outer_size(node), Size::new(310.0, 130.0));

        dom.set_css(node, Property::Width, &StyleValue::Px(500.0));
        dom.set_css(node, Property::Height, &StyleValue::keyword("auto"));
        assert_eq!(dom.outer_size(node), Size::new(510.0, 130.0));
    }

    #[test]
    fn test_unset_removes_inline_style() {
        let dom = MockDom::new();
        let node = dom.append_element(dom.body(), "div");
        dom.set_css(node, Property::Scale, &StyleValue::Number(0.0));
        assert_eq!(dom.css(node, Property::Transform), StyleValue::Number(0.0));

        dom.set_css(node, Property::Transform, &StyleValue::Unset);
        assert_eq!(dom.css(node, Property::Scale), StyleValue::Unset);
    }
}
