//! WebUI WASM Module
//!
//! Client-side widgets for XML-backed administration pages: a paginated
//! list view, an icon view, and an asynchronously submitted form. The
//! widgets are written against the [`dom::Dom`] and [`transport::Transport`]
//! traits so they run both in the browser and against in-memory doubles.

pub mod api;
pub mod bootstrap;
pub mod dom;
pub mod transport;
pub mod widgets;
pub mod xml;

// Re-export commonly used types
pub use bootstrap::StartupRegistry;
pub use dom::{Cursor, Dom, MemoryDom, WebDom};
pub use transport::{QueuedTransport, Request, Response, Transport, XhrTransport};
pub use widgets::{FormController, IconView, ListView, WidgetError};
pub use xml::{FormResult, ResultSet};

use wasm_bindgen::prelude::*;

// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        crate::wasm_warn!("logger already initialized: {}", e);
    }

    log::info!("WebUI WASM module initialized");
}
