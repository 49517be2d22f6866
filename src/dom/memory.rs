//! In-memory DOM
//!
//! A small arena-backed element tree implementing [`Dom`]. It records alerts,
//! the body cursor and focus so that native hosts and tests can observe the
//! page-global effects the widgets produce.

use super::{Cursor, Dom, FormControl};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Handle to a node inside a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Arena-backed document. The root is a `body` element.
#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    body: NodeId,
    alerts: RefCell<Vec<String>>,
    cursor: Cell<Cursor>,
    focused: Cell<Option<NodeId>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            ..NodeData::default()
        };
        Self {
            nodes: RefCell::new(vec![body]),
            body: NodeId(0),
            alerts: RefCell::new(Vec::new()),
            cursor: Cell::new(Cursor::Default),
            focused: Cell::new(None),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create an element and append it to `parent`
    pub fn element(&self, parent: &NodeId, tag: &str) -> NodeId {
        let node = self.new_node(tag);
        self.append_child(parent, &node);
        node
    }

    /// Create an element with an `id` and append it to `parent`
    pub fn element_with_id(&self, parent: &NodeId, tag: &str, id: &str) -> NodeId {
        let node = self.element(parent, tag);
        self.set_id(&node, id);
        node
    }

    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn is_disabled(&self, node: &NodeId) -> bool {
        self.attribute(node, "disabled").is_some()
    }

    pub fn value(&self, node: &NodeId) -> String {
        self.attribute(node, "value").unwrap_or_default()
    }

    /// Alerts shown so far, oldest first
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor.get()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    fn new_node(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        NodeId(nodes.len() - 1)
    }

    fn collect_descendants(&self, root: NodeId, tag: &str, out: &mut Vec<NodeId>) {
        let children = self.nodes.borrow()[root.0].children.clone();
        for child in children {
            if tag == "*" || self.nodes.borrow()[child.0].tag == tag {
                out.push(child);
            }
            self.collect_descendants(child, tag, out);
        }
    }

    fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let data = &nodes[current.0];
            if data.attributes.get("id").map(String::as_str) == Some(id) {
                return Some(current);
            }
            stack.extend(data.children.iter().rev().copied());
        }
        None
    }

    fn class_tokens(&self, node: &NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn set_class_tokens(&self, node: &NodeId, tokens: &[String]) {
        self.set_attribute(node, "class", &tokens.join(" "));
    }

    fn detach(&self, child: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[child.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != child);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_by_id(self.body, id)
    }

    fn descendants_by_tag(&self, root: &NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(*root, &tag.to_ascii_lowercase(), &mut out);
        out
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants_by_tag(&self.body, tag)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.new_node(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) {
        if self.parent(child) == Some(*parent) {
            self.detach(*child);
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    fn id(&self, node: &NodeId) -> String {
        self.attribute(node, "id").unwrap_or_default()
    }

    fn set_id(&self, node: &NodeId, id: &str) {
        self.set_attribute(node, "id", id);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.class_tokens(node).iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut tokens = self.class_tokens(node);
        if !tokens.iter().any(|c| c == class) {
            tokens.push(class.to_string());
            self.set_class_tokens(node, &tokens);
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut tokens = self.class_tokens(node);
        let before = tokens.len();
        tokens.retain(|c| c != class);
        if tokens.len() != before {
            self.set_class_tokens(node, &tokens);
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        for child in self.children(node) {
            self.detach(child);
        }
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn text(&self, node: &NodeId) -> String {
        let mut out = self.nodes.borrow()[node.0].text.clone();
        for child in self.children(node) {
            out.push_str(&self.text(&child));
        }
        out
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "disabled");
        } else {
            self.nodes.borrow_mut()[node.0].attributes.remove("disabled");
        }
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.set_attribute(node, "value", value);
    }

    fn form_controls(&self, form: &NodeId) -> Vec<FormControl> {
        let mut controls = Vec::new();
        let mut stack: Vec<NodeId> = self.children(form).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            let name = self.attribute(&node, "name").unwrap_or_default();
            match self.tag_name(&node).as_str() {
                "input" => {
                    let kind = self
                        .attribute(&node, "type")
                        .unwrap_or_else(|| "text".to_string())
                        .to_ascii_lowercase();
                    if kind == "text" || kind == "password" {
                        controls.push(FormControl::Text {
                            name,
                            value: self.value(&node),
                        });
                    } else {
                        controls.push(FormControl::Other);
                    }
                    continue;
                }
                "select" => {
                    let selected = self
                        .descendants_by_tag(&node, "option")
                        .into_iter()
                        .filter(|o| self.attribute(o, "selected").is_some())
                        .map(|o| self.attribute(&o, "value").unwrap_or_else(|| self.text(&o)))
                        .collect();
                    controls.push(FormControl::Select { name, selected });
                    continue;
                }
                "textarea" | "button" => {
                    controls.push(FormControl::Other);
                    continue;
                }
                _ => {}
            }
            stack.extend(self.children(&node).into_iter().rev());
        }
        controls
    }

    fn focus(&self, node: &NodeId) {
        self.focused.set(Some(*node));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn set_cursor(&self, cursor: Cursor) {
        self.cursor.set(cursor);
    }
}
