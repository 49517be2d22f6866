//! JavaScript `IconView` handle

use super::helpers::{
    ctrl_pressed, deserialize, event_element, js_error, listen, strings_to_array, web_dom,
};
use crate::dom::{Dom, WebDom};
use crate::widgets::{IconView, IconViewConfig, Modifier};
use crate::wasm_info;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = IconView)]
pub struct JsIconView {
    view: Rc<IconView<WebDom>>,
    dom: WebDom,
}

#[wasm_bindgen(js_class = IconView)]
impl JsIconView {
    /// `config` is `{ name, actions }`
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsIconView, JsValue> {
        let config: IconViewConfig = deserialize(config, "Invalid IconView config")?;
        wasm_info!("IconView '{}' created", config.name);
        let dom = web_dom()?;
        Ok(Self {
            view: Rc::new(IconView::new(dom.clone(), config)),
            dom,
        })
    }

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

    pub fn attach(&self) -> Result<(), JsValue> {
        let name = self.view.name();
        let container = self
            .dom
            .element_by_id(name)
            .ok_or_else(|| js_error(format!("IconView container '{}' not found", name)))?;

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

    pub fn selection(&self) -> js_sys::Array {
        strings_to_array(&self.view.selected_ids())
    }
}

fn dispatch_click(view: &IconView<WebDom>, event: &web_sys::Event) {
    if let Some(target) = event_element(event) {
        view.handle_click(&target, ctrl_pressed(event));
    }
}

fn dispatch_dblclick(view: &IconView<WebDom>, event: &web_sys::Event) {
    if let Some(target) = event_element(event) {
        view.handle_dblclick(&target);
    }
}
