//! WASM API surface
//!
//! JavaScript-facing handles wrapping the widgets with the browser DOM and
//! XMLHttpRequest transport.

pub mod helpers;
pub mod form;
pub mod iconview;
pub mod listview;
pub mod webui;

pub use form::JsForm;
pub use iconview::JsIconView;
pub use listview::JsListView;
pub use webui::{check_list_view_config, parse_form_result, parse_result_set, JsWebUi};
