//! Browser [`Dom`] backend built on `web-sys`.

use std::cell::RefCell;

use lumen_core::{Dom, InsertPosition, NodeId, NodeRegistry, Property, Size, StyleValue};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// [`Dom`] over the page's live document.
///
/// Elements are registered on first sight and keep their [`NodeId`] until
/// [`Dom::remove`] releases it. The body is never released.
pub struct WebDom {
    window: web_sys::Window,
    document: Document,
    body: NodeId,
    nodes: RefCell<NodeRegistry<Element>>,
}

impl WebDom {
    /// Backend for the current page, or `None` outside a browser document.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let mut nodes = NodeRegistry::new();
        let body = nodes.insert(document.body()?.into());

        Some(Self {
            window,
            document,
            body,
            nodes: RefCell::new(nodes),
        })
    }

    fn register(&self, element: Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(id) = nodes.find(|n| n.is_same_node(Some(&element))) {
            return id;
        }
        nodes.insert(element)
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node).cloned()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }
}

fn log_js_error(operation: &str, err: JsValue) {
    tracing::warn!(operation, error = ?err, "DOM call failed");
}

fn parse_scale(transform: &str) -> StyleValue {
    transform
        .trim()
        .strip_prefix("scale(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|v| v.trim().parse::<f32>().ok())
        .map(StyleValue::Number)
        .unwrap_or(StyleValue::Unset)
}

impl Dom for WebDom {
    fn body(&self) -> NodeId {
        self.body
    }

    fn viewport_size(&self) -> Size<f32> {
        let read = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Size::new(
            read(self.window.inner_width()),
            read(self.window.inner_height()),
        )
    }

    fn query(&self, selector: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log_js_error("query", err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        match self.document.create_element(tag) {
            Ok(element) => Some(self.register(element)),
            Err(err) => {
                log_js_error("create_element", err);
                None
            }
        }
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            if let Err(err) = element.set_attribute(name, value) {
                log_js_error("set_attribute", err);
            }
        }
    }

    fn add_class(&self, node: NodeId, classes: &str) {
        let Some(element) = self.element(node) else {
            return;
        };
        let mut class_name = element.class_name();
        for class in classes.split_whitespace() {
            if !class_name.split_whitespace().any(|c| c == class) {
                if !class_name.is_empty() {
                    class_name.push(' ');
                }
                class_name.push_str(class);
            }
        }
        element.set_class_name(&class_name);
    }

    fn insert(&self, node: NodeId, target: NodeId, position: InsertPosition) {
        let (Some(node), Some(target)) = (self.element(node), self.element(target)) else {
            return;
        };
        let result = match position {
            InsertPosition::Append => target.append_child(&node),
            InsertPosition::AfterEnd => match target.parent_node() {
                Some(parent) => parent.insert_before(&node, target.next_sibling().as_ref()),
                None => return,
            },
        };
        if let Err(err) = result {
            log_js_error("insert", err);
        }
    }

    fn remove(&self, node: NodeId) {
        if node == self.body {
            return;
        }
        if let Some(element) = self.nodes.borrow_mut().remove(node) {
            element.remove();
        }
    }

    fn css(&self, node: NodeId, property: Property) -> StyleValue {
        let Some(element) = self.html(node) else {
            return StyleValue::Unset;
        };
        let value = element
            .style()
            .get_property_value(property.css_name())
            .unwrap_or_default();
        match property {
            Property::Scale => parse_scale(&value),
            _ => StyleValue::parse(&value),
        }
    }

    fn set_css(&self, node: NodeId, property: Property, value: &StyleValue) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        let result = match (property, value) {
            (_, StyleValue::Unset) => style.remove_property(property.css_name()).map(|_| ()),
            (Property::Scale, value) => style.set_property("transform", &format!("scale({value})")),
            (property, value) => style.set_property(property.css_name(), &value.to_string()),
        };
        if let Err(err) = result {
            log_js_error("set_css", err);
        }
    }

    fn outer_size(&self, node: NodeId) -> Size<f32> {
        let Some(element) = self.html(node) else {
            return Size::ZERO;
        };
        let style = element.style();
        let hidden = style.get_property_value("display").unwrap_or_default() == "none";
        if hidden {
            let _ = style.set_property("display", "block");
        }
        let size = Size::new(element.offset_width() as f32, element.offset_height() as f32);
        if hidden {
            let _ = style.set_property("display", "none");
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("scale(0.5)"), StyleValue::Number(0.5));
        assert_eq!(parse_scale("rotate(3deg)"), StyleValue::Unset);
    }
}
