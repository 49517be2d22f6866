//! WASM build test
//!
//! Checks that the JavaScript-facing handles can be created in a browser.

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use webui_wasm::api::*;

wasm_bindgen_test_configure!(run_in_browser);

fn json(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

#[wasm_bindgen_test]
fn test_listview_creation() {
    let view = JsListView::new(json(
        r#"{"name": "pages", "url": "/pages.xml", "columns": ["id"], "pagesize": 5}"#,
    ))
    .unwrap();
    assert_eq!(view.page_size(), 5);
    assert_eq!(view.start(), 0);
    assert_eq!(view.total(), None);
    assert_eq!(view.selection().length(), 0);
}

#[wasm_bindgen_test]
fn test_listview_rejects_bad_config() {
    assert!(JsListView::new(json(r#"{"name": "pages"}"#)).is_err());
    assert!(check_list_view_config(json(r#"{"url": "/x", "columns": []}"#)).is_err());
}

#[wasm_bindgen_test]
fn test_unknown_modifier_is_an_error() {
    let view = JsIconView::new(json(r#"{"name": "icons"}"#)).unwrap();
    assert!(view.select_id("1", "shift").is_err());
}

#[wasm_bindgen_test]
fn test_form_fields_are_optional() {
    assert!(JsForm::new("f".into(), "/submit".into(), JsValue::UNDEFINED).is_ok());
    let form = JsForm::new("f".into(), "/submit".into(), json(r#"["email"]"#)).unwrap();
    assert_eq!(form.error_fields().length(), 0);
}

#[wasm_bindgen_test]
fn test_webui_runs_init_functions_once() {
    let mut ui = JsWebUi::new().unwrap();
    ui.add_init_func(js_sys::Function::new_no_args("return 1;"));
    ui.add_init_func(js_sys::Function::new_no_args("throw new Error('ignored');"));
    assert_eq!(ui.body_onload(), 2);
    assert_eq!(ui.body_onload(), 0);
    assert!(!ui.focus("missing"));
}

#[wasm_bindgen_test]
fn test_parse_result_set_to_js() {
    let value = parse_result_set(
        r#"<resultset start="0" size="1" total="3"><result><id>4</id></result></resultset>"#,
    )
    .unwrap();
    let total = js_sys::Reflect::get(&value, &JsValue::from_str("total")).unwrap();
    assert_eq!(total.as_f64(), Some(3.0));
    assert!(parse_form_result("<formresult/>").is_err());
}
