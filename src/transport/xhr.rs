//! `XMLHttpRequest` transport for the browser

use super::{Completion, Method, Request, Response, Transport, TransportError, FORM_CONTENT_TYPE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::XmlHttpRequest;

/// Issues each request on a fresh `XMLHttpRequest`
#[derive(Debug, Clone, Copy, Default)]
pub struct XhrTransport;

impl XhrTransport {
    pub fn new() -> Self {
        Self
    }
}

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

impl Transport for XhrTransport {
    fn start(&self, request: Request, on_complete: Completion) -> Result<(), TransportError> {
        let open_error = |e: JsValue| TransportError::Open {
            method: request.method,
            url: request.url.clone(),
            reason: js_reason(&e),
        };
        let xhr = XmlHttpRequest::new().map_err(open_error)?;
        xhr.open_with_async(request.method.as_str(), &request.url, true)
            .map_err(open_error)?;

        // loadend fires exactly once, after load, error or abort
        let handle = xhr.clone();
        let callback = Closure::once_into_js(move || {
            let status = handle.status().unwrap_or(0);
            let body = handle.response_text().ok().flatten().unwrap_or_default();
            on_complete(Response { status, body });
        });
        xhr.set_onloadend(Some(callback.unchecked_ref()));

        let send_error = |e: JsValue| TransportError::Send {
            url: request.url.clone(),
            reason: js_reason(&e),
        };
        match request.method {
            Method::Get => xhr.send().map_err(send_error),
            Method::Post => {
                xhr.set_request_header("Content-Type", FORM_CONTENT_TYPE)
                    .map_err(send_error)?;
                xhr.send_with_opt_str(request.body.as_deref())
                    .map_err(send_error)
            }
        }
    }
}
