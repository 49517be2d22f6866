//! JavaScript `WebUi` page bootstrap handle
//!
//! ```html
//! <script type="module">
//!   const ui = new WebUi();
//!   ui.addInitFunc(() => pages.initialize());
//!   window.addEventListener("load", () => ui.bodyOnload());
//! </script>
//! ```

use super::helpers::{deserialize, serialize, web_dom};
use crate::bootstrap::{focus_field, StartupRegistry};
use crate::dom::WebDom;
use crate::xml::{parse_formresult, parse_resultset};
use crate::{wasm_error, wasm_info};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = WebUi)]
pub struct JsWebUi {
    registry: StartupRegistry,
    dom: WebDom,
}

#[wasm_bindgen(js_class = WebUi)]
impl JsWebUi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsWebUi, JsValue> {
        Ok(Self {
            registry: StartupRegistry::new(),
            dom: web_dom()?,
        })
    }

    /// Queue a setup function for `bodyOnload`
    #[wasm_bindgen(js_name = addInitFunc)]
    pub fn add_init_func(&mut self, func: js_sys::Function) {
        self.registry.register(move || {
            if let Err(e) = func.call0(&JsValue::NULL) {
                wasm_error!("init function failed: {:?}", e);
            }
        });
    }

    /// Run the queued setup functions once, in order. Returns how many ran.
    #[wasm_bindgen(js_name = bodyOnload)]
    pub fn body_onload(&mut self) -> usize {
        let count = self.registry.run();
        wasm_info!("page initialized ({} init functions)", count);
        count
    }

    /// Focus a control of the `form.webui` form by name
    pub fn focus(&self, name: &str) -> bool {
        focus_field(&self.dom, name)
    }
}

/// Parse a `<resultset>` document into `{ start, size, total, rows }`
#[wasm_bindgen(js_name = parseResultSet)]
pub fn parse_result_set(xml: &str) -> Result<JsValue, JsValue> {
    let result = parse_resultset(xml).map_err(|e| super::helpers::js_error(e.to_string()))?;
    serialize(&result, "Could not serialize result set")
}

/// Parse a `<formresult>` document into `{ status, message, fields }`
#[wasm_bindgen(js_name = parseFormResult)]
pub fn parse_form_result(xml: &str) -> Result<JsValue, JsValue> {
    let result = parse_formresult(xml).map_err(|e| super::helpers::js_error(e.to_string()))?;
    serialize(&result, "Could not serialize form result")
}

/// Validate a widget configuration object without creating the widget
#[wasm_bindgen(js_name = checkListViewConfig)]
pub fn check_list_view_config(config: JsValue) -> Result<(), JsValue> {
    deserialize::<crate::widgets::ListViewConfig>(config, "Invalid ListView config").map(|_| ())
}
