//! JavaScript `Form` handle

use super::helpers::{deserialize, web_dom};
use crate::dom::WebDom;
use crate::transport::XhrTransport;
use crate::widgets::{FormConfig, FormController};
use crate::wasm_info;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = Form)]
pub struct JsForm {
    form: FormController<WebDom, XhrTransport>,
}

#[wasm_bindgen(js_class = Form)]
impl JsForm {
    /// `fields` is an optional array of field names that carry error labels
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, action: String, fields: JsValue) -> Result<JsForm, JsValue> {
        let fields: Option<Vec<String>> = if fields.is_undefined() || fields.is_null() {
            None
        } else {
            deserialize(fields, "Form fields must be an array of strings")?
        };
        let config = FormConfig {
            name,
            action,
            fields: fields.unwrap_or_default(),
        };
        wasm_info!("Form '{}' posts to {}", config.name, config.action);
        Ok(Self {
            form: FormController::new(web_dom()?, XhrTransport::new(), config),
        })
    }

    pub fn submit(&self) {
        self.form.submit();
    }

    /// Names of the fields the last response marked in error
    #[wasm_bindgen(js_name = errorFields)]
    pub fn error_fields(&self) -> js_sys::Array {
        super::helpers::strings_to_array(&self.form.errored_fields())
    }
}
