//! Asynchronous HTTP transport
//!
//! [`Transport`] issues one request and hands the final response to a
//! completion callback. [`AjaxRequest`] sits on top and routes the completion
//! to a success callback (HTTP 200) or an error callback (anything else).
//!
//! There is no timeout, retry or cancellation at this layer.

pub mod queued;
pub mod xhr;

pub use queued::QueuedTransport;
pub use xhr::XhrTransport;

use std::fmt;
use thiserror::Error;

/// Content type used for POST bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub method: Method,
    /// Only sent for POST
    pub body: Option<String>,
}

/// A completed response. Network-level failures surface as status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub type Completion = Box<dyn FnOnce(Response)>;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Could not open {method} request to {url}: {reason}")]
    Open {
        method: Method,
        url: String,
        reason: String,
    },

    #[error("Could not send request to {url}: {reason}")]
    Send { url: String, reason: String },
}

/// Something that can carry one HTTP request to completion.
///
/// `on_complete` is called exactly once when the request finishes, whatever
/// the status. Implementations may call it before `start` returns.
pub trait Transport {
    fn start(&self, request: Request, on_complete: Completion) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    fn start(&self, request: Request, on_complete: Completion) -> Result<(), TransportError> {
        (**self).start(request, on_complete)
    }
}

/// One request with a success and an error continuation
pub struct AjaxRequest {
    on_success: Completion,
    on_error: Completion,
}

impl AjaxRequest {
    pub fn new(
        on_success: impl FnOnce(Response) + 'static,
        on_error: impl FnOnce(Response) + 'static,
    ) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }

    /// Issue the request. `body` is ignored for GET.
    pub fn start<T: Transport + ?Sized>(
        self,
        transport: &T,
        url: &str,
        method: Method,
        body: Option<String>,
    ) -> Result<(), TransportError> {
        let request = Request {
            url: url.to_string(),
            method,
            body: match method {
                Method::Get => None,
                Method::Post => body,
            },
        };
        log::debug!("{} {}", method, url);

        let AjaxRequest {
            on_success,
            on_error,
        } = self;
        transport.start(
            request,
            Box::new(move |response: Response| {
                if response.is_success() {
                    on_success(response)
                } else {
                    log::debug!("request failed with status {}", response.status);
                    on_error(response)
                }
            }),
        )
    }
}
