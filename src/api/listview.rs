//! JavaScript `ListView` handle
//!
//! ```js
//! const pages = new ListView({
//!     name: "pages", url: "/admin/pages.xml", columns: ["id", "title", "owner"],
//!     actions: { edit: [1, 1], delete: [1, null], add: [0, null] },
//!     start: 0, pageSize: 25,
//! });
//! pages.attach();
//! pages.initialize();
//! ```

use super::helpers::{
    ctrl_pressed, deserialize, event_element, js_error, listen, strings_to_array, web_dom,
};
use crate::dom::{Dom, WebDom};
use crate::transport::XhrTransport;
use crate::widgets::{ListView, ListViewConfig, Modifier};
use crate::wasm_info;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

type WebListView = ListView<WebDom, XhrTransport>;

#[wasm_bindgen(js_name = ListView)]
pub struct JsListView {
    view: Rc<WebListView>,
}

#[wasm_bindgen(js_class = ListView)]
impl JsListView {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsListView, JsValue> {
        let config: ListViewConfig = deserialize(config, "Invalid ListView config")?;
        wasm_info!(
            "ListView '{}' bound to {} ({} columns, {} actions)",
            config.name,
            config.url,
            config.columns.len(),
            config.actions.len()
        );
        let view = ListView::new(web_dom()?, XhrTransport::new(), config);
        Ok(Self {
            view: Rc::new(view),
        })
    }

    pub fn initialize(&self) {
        self.view.initialize();
    }

    pub fn update(&self, start: usize, page_size: usize) {
        self.view.update(start, page_size);
    }

    pub fn prevpage(&self) -> bool {
        self.view.prevpage()
    }

    pub fn nextpage(&self) -> bool {
        self.view.nextpage()
    }

    /// `modifier` is one of `click`, `control`, `dblclick`
    #[wasm_bindgen(js_name = selectId)]
    pub fn select_id(&self, id: &str, modifier: &str) -> Result<(), JsValue> {
        let modifier: Modifier = modifier.parse().map_err(|e| js_error(format!("{}", e)))?;
        self.view.select_id(id, modifier);
        Ok(())
    }

    pub fn deselect(&self) {
        self.view.deselect();
    }

    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(&self, event: &web_sys::Event) {
        dispatch_click(&self.view, event);
    }

    #[wasm_bindgen(js_name = handleDblclick)]
    pub fn handle_dblclick(&self, event: &web_sys::Event) {
        dispatch_dblclick(&self.view, event);
    }

    /// Install delegated click and dblclick listeners on the container.
    /// Use this or inline `handleClick`/`handleDblclick` handlers, not both.
    pub fn attach(&self) -> Result<(), JsValue> {
        let name = self.view.name();
        let container = self
            .view
            .dom()
            .element_by_id(name)
            .ok_or_else(|| js_error(format!("ListView container '{}' not found", name)))?;

        let weak = Rc::downgrade(&self.view);
        listen(&container, "click", move |event| {
            if let Some(view) = weak.upgrade() {
                dispatch_click(&view, &event);
            }
        })?;
        let weak = Rc::downgrade(&self.view);
        listen(&container, "dblclick", move |event| {
            if let Some(view) = weak.upgrade() {
                dispatch_dblclick(&view, &event);
            }
        })
    }

    /// Ids of the selected rows
    pub fn selection(&self) -> js_sys::Array {
        strings_to_array(&self.view.selected_ids())
    }

    #[wasm_bindgen(getter)]
    pub fn start(&self) -> usize {
        self.view.start()
    }

    #[wasm_bindgen(getter, js_name = pageSize)]
    pub fn page_size(&self) -> usize {
        self.view.page_size()
    }

    /// `undefined` until the first page has loaded
    #[wasm_bindgen(getter)]
    pub fn total(&self) -> Option<usize> {
        self.view.total()
    }
}

fn dispatch_click(view: &WebListView, event: &web_sys::Event) {
    if let Some(target) = event_element(event) {
        view.handle_click(&target, ctrl_pressed(event));
    }
}

fn dispatch_dblclick(view: &WebListView, event: &web_sys::Event) {
    if let Some(target) = event_element(event) {
        view.handle_dblclick(&target);
    }
}
