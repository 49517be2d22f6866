//! Browser DOM backed by `web_sys`

use super::{Cursor, Dom, FormControl};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlCollection, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlOptionElement, HtmlSelectElement, Window,
};

/// [`Dom`] over the live browser document
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Bind to the global `window.document`. Returns `None` outside a browser.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn collection_to_vec(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn descendants_by_tag(&self, root: &Element, tag: &str) -> Vec<Element> {
        collection_to_vec(&root.get_elements_by_tag_name(tag))
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<Element> {
        collection_to_vec(&self.document.get_elements_by_tag_name(tag))
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document
            .create_element(tag)
            .map_err(|e| log::error!("createElement({}) failed: {:?}", tag, e))
            .ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            log::error!("appendChild failed: {:?}", e);
        }
    }

    fn remove_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.remove_child(child) {
            log::error!("removeChild failed: {:?}", e);
        }
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn id(&self, node: &Element) -> String {
        node.id()
    }

    fn set_id(&self, node: &Element, id: &str) {
        node.set_id(id);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::error!("setAttribute({}) failed: {:?}", name, e);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            log::error!("classList.add({}) failed: {:?}", class, e);
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            log::error!("classList.remove({}) failed: {:?}", class, e);
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            self.set_attribute(node, "disabled", "disabled");
        } else if let Err(e) = node.remove_attribute("disabled") {
            log::error!("removeAttribute(disabled) failed: {:?}", e);
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
        self.set_attribute(node, "value", value);
    }

    fn form_controls(&self, form: &Element) -> Vec<FormControl> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        let elements = form.elements();
        (0..elements.length())
            .filter_map(|i| elements.item(i))
            .map(|el| {
                if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                    let kind = input.type_().to_ascii_lowercase();
                    if kind == "text" || kind == "password" {
                        return FormControl::Text {
                            name: input.name(),
                            value: input.value(),
                        };
                    }
                } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
                    let selected = collection_to_vec(&select.selected_options())
                        .into_iter()
                        .filter_map(|o| o.dyn_into::<HtmlOptionElement>().ok())
                        .map(|o| o.value())
                        .collect();
                    return FormControl::Select {
                        name: select.name(),
                        selected,
                    };
                }
                FormControl::Other
            })
            .collect()
    }

    fn focus(&self, node: &Element) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            if let Err(e) = input.focus() {
                log::warn!("focus failed: {:?}", e);
            }
            input.select();
        } else if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(e) = el.focus() {
                log::warn!("focus failed: {:?}", e);
            }
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert failed: {:?}", e);
        }
    }

    fn set_cursor(&self, cursor: Cursor) {
        if let Some(body) = self.document.body() {
            if let Err(e) = body.style().set_property("cursor", cursor.css_value()) {
                log::error!("setting body cursor failed: {:?}", e);
            }
        }
    }
}
