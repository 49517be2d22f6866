//! DOM capability layer
//!
//! The widgets never talk to `web_sys` directly. They go through the [`Dom`]
//! trait, which exposes only the handful of primitives they need: lookup by
//! id, tag-scoped descendant queries, tree mutation, class tokens, and the
//! two page-global effects (alert dialog and body cursor).
//!
//! - [`WebDom`]: the browser implementation on top of `web_sys`
//! - [`MemoryDom`]: an in-memory tree for native hosts and tests

pub mod memory;
pub mod web;

pub use memory::{MemoryDom, NodeId};
pub use web::WebDom;

use std::rc::Rc;

/// Body cursor shown while a widget waits on the network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Busy,
}

impl Cursor {
    /// CSS `cursor` property value
    pub fn css_value(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Busy => "wait",
        }
    }
}

/// A successful form control as seen by form serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormControl {
    /// `<input type="text">` or `<input type="password">`
    Text { name: String, value: String },
    /// `<select>` with the values of its selected options, in option order
    Select { name: String, selected: Vec<String> },
    /// Anything the serializer ignores (buttons, checkboxes, hidden fields...)
    Other,
}

/// Primitive DOM operations required by the widgets.
///
/// Node handles are cheap to clone. Tag names are reported in lowercase.
pub trait Dom {
    type Node: Clone + PartialEq + std::fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All descendants of `root` with the given tag, in document order.
    /// `"*"` matches every element.
    fn descendants_by_tag(&self, root: &Self::Node, tag: &str) -> Vec<Self::Node>;

    /// All elements in the document with the given tag (or `"*"`), in
    /// document order
    fn elements_by_tag(&self, tag: &str) -> Vec<Self::Node>;

    /// Create a detached element. `None` if the host rejects the tag name.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node);
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn tag_name(&self, node: &Self::Node) -> String;
    fn id(&self, node: &Self::Node) -> String;
    fn set_id(&self, node: &Self::Node, id: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Replace all children of `node` with a single text node
    fn set_text(&self, node: &Self::Node, text: &str);
    fn text(&self, node: &Self::Node) -> String;

    fn set_disabled(&self, node: &Self::Node, disabled: bool);
    fn set_value(&self, node: &Self::Node, value: &str);

    /// Form controls of a `<form>` element, in document order
    fn form_controls(&self, form: &Self::Node) -> Vec<FormControl>;

    /// Focus a control and select its contents where supported
    fn focus(&self, node: &Self::Node);

    /// Blocking user-facing alert dialog
    fn alert(&self, message: &str);

    fn set_cursor(&self, cursor: Cursor);
}

impl<D: Dom + ?Sized> Dom for Rc<D> {
    type Node = D::Node;

    fn element_by_id(&self, id: &str) -> Option<Self::Node> {
        (**self).element_by_id(id)
    }

    fn descendants_by_tag(&self, root: &Self::Node, tag: &str) -> Vec<Self::Node> {
        (**self).descendants_by_tag(root, tag)
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<Self::Node> {
        (**self).elements_by_tag(tag)
    }

    fn create_element(&self, tag: &str) -> Option<Self::Node> {
        (**self).create_element(tag)
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) {
        (**self).append_child(parent, child)
    }

    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) {
        (**self).remove_child(parent, child)
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }

    fn tag_name(&self, node: &Self::Node) -> String {
        (**self).tag_name(node)
    }

    fn id(&self, node: &Self::Node) -> String {
        (**self).id(node)
    }

    fn set_id(&self, node: &Self::Node, id: &str) {
        (**self).set_id(node, id)
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        (**self).attribute(node, name)
    }

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) {
        (**self).set_attribute(node, name, value)
    }

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        (**self).has_class(node, class)
    }

    fn add_class(&self, node: &Self::Node, class: &str) {
        (**self).add_class(node, class)
    }

    fn remove_class(&self, node: &Self::Node, class: &str) {
        (**self).remove_class(node, class)
    }

    fn set_text(&self, node: &Self::Node, text: &str) {
        (**self).set_text(node, text)
    }

    fn text(&self, node: &Self::Node) -> String {
        (**self).text(node)
    }

    fn set_disabled(&self, node: &Self::Node, disabled: bool) {
        (**self).set_disabled(node, disabled)
    }

    fn set_value(&self, node: &Self::Node, value: &str) {
        (**self).set_value(node, value)
    }

    fn form_controls(&self, form: &Self::Node) -> Vec<FormControl> {
        (**self).form_controls(form)
    }

    fn focus(&self, node: &Self::Node) {
        (**self).focus(node)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn set_cursor(&self, cursor: Cursor) {
        (**self).set_cursor(cursor)
    }
}

/// Walk from `node` up through its ancestors (inclusive) and return the first
/// one accepted by `pred`.
pub fn closest<D, F>(dom: &D, node: &D::Node, mut pred: F) -> Option<D::Node>
where
    D: Dom + ?Sized,
    F: FnMut(&D::Node) -> bool,
{
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if pred(&n) {
            return Some(n);
        }
        current = dom.parent(&n);
    }
    None
}
