//! AJAX form submission with server-side validation feedback
//!
//! The form `{name}` is serialized and POSTed to its action URL. The server
//! answers with a `<formresult>`; its message goes into `{name}_message` and
//! every field it names gets the `error` class on `{name}_{field}_label`.

use super::report;
use crate::dom::{Dom, FormControl};
use crate::transport::{AjaxRequest, Method, Response, Transport, TransportError};
use crate::xml::{parse_formresult, FormResult, XmlError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};
use thiserror::Error;

pub const ERROR_CLASS: &str = "error";

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormConfig {
    /// Form element id, and prefix of its message and label ids
    pub name: String,
    /// Submission URL
    pub action: String,
    /// Fields the server may report in error. When non-empty, any other
    /// reported field is logged.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Error)]
pub enum FormError {
    #[error("Could not retrieve form DOM node.")]
    MissingForm,

    #[error("Missing DOM node: {0}")]
    MissingElement(String),

    #[error("Could not complete form submission. Please try again.")]
    Rejected(u16),

    #[error("Could not complete form submission. Please try again.")]
    Transport(#[from] TransportError),

    #[error("Could not parse form submission response.")]
    Parse(#[source] XmlError),
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// `a=1&b=2` from the text, password and select controls, in document order.
/// Every selected option of a `<select>` contributes its own pair.
pub fn encode_form_body(controls: &[FormControl]) -> String {
    let mut pairs: Vec<String> = Vec::new();
    for control in controls {
        match control {
            FormControl::Text { name, value } => {
                pairs.push(format!("{}={}", encode_component(name), encode_component(value)));
            }
            FormControl::Select { name, selected } => {
                for value in selected {
                    pairs.push(format!("{}={}", encode_component(name), encode_component(value)));
                }
            }
            FormControl::Other => {}
        }
    }
    pairs.join("&")
}

struct Inner<D: Dom> {
    dom: D,
    config: FormConfig,
    /// Labels marked by earlier responses
    marked: RefCell<BTreeSet<String>>,
}

pub struct FormController<D: Dom + 'static, T: Transport> {
    inner: Rc<Inner<D>>,
    transport: T,
}

impl<D: Dom + 'static, T: Transport> FormController<D, T> {
    pub fn new(dom: D, transport: T, config: FormConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                dom,
                config,
                marked: RefCell::new(BTreeSet::new()),
            }),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    /// Serialize the form and POST it to the action URL
    pub fn submit(&self) {
        if let Err(e) = self.try_submit() {
            report(&self.inner.dom, &e);
        }
    }

    /// Apply a parsed server verdict to the page
    pub fn apply_result(&self, result: &FormResult) {
        if let Err(e) = self.inner.apply_result(result) {
            report(&self.inner.dom, &e);
        }
    }

    /// Names of the fields currently marked in error
    pub fn errored_fields(&self) -> Vec<String> {
        self.inner.marked.borrow().iter().cloned().collect()
    }

    fn try_submit(&self) -> Result<(), FormError> {
        let form = self
            .inner
            .dom
            .element_by_id(&self.inner.config.name)
            .ok_or(FormError::MissingForm)?;
        let body = encode_form_body(&self.inner.dom.form_controls(&form));
        log::debug!(
            "{}: submitting {} bytes to {}",
            self.name(),
            body.len(),
            self.inner.config.action
        );

        let on_done: Weak<Inner<D>> = Rc::downgrade(&self.inner);
        let on_error = on_done.clone();
        AjaxRequest::new(
            move |response| {
                if let Some(inner) = on_done.upgrade() {
                    inner.submission_done(&response);
                }
            },
            move |response: Response| {
                if let Some(inner) = on_error.upgrade() {
                    report(&inner.dom, &FormError::Rejected(response.status));
                }
            },
        )
        .start(&self.transport, &self.inner.config.action, Method::Post, Some(body))?;
        Ok(())
    }
}

impl<D: Dom> Inner<D> {
    fn label_id(&self, field: &str) -> String {
        format!("{}_{}_label", self.config.name, field)
    }

    fn submission_done(&self, response: &Response) {
        let outcome = parse_formresult(&response.body)
            .map_err(FormError::Parse)
            .and_then(|result| self.apply_result(&result));
        if let Err(e) = outcome {
            report(&self.dom, &e);
        }
    }

    fn apply_result(&self, result: &FormResult) -> Result<(), FormError> {
        let message_id = format!("{}_message", self.config.name);
        let message = self
            .dom
            .element_by_id(&message_id)
            .ok_or(FormError::MissingElement(message_id))?;
        self.dom.set_text(&message, &result.message);

        self.clear_marks();
        if result.is_ok() {
            self.dom.remove_class(&message, ERROR_CLASS);
            return Ok(());
        }

        self.dom.add_class(&message, ERROR_CLASS);
        let mut marked = self.marked.borrow_mut();
        for field in &result.fields {
            if !self.config.fields.is_empty() && !self.config.fields.contains(field) {
                log::warn!("{}: response marks unconfigured field '{}'", self.config.name, field);
            }
            match self.dom.element_by_id(&self.label_id(field)) {
                Some(label) => {
                    self.dom.add_class(&label, ERROR_CLASS);
                    marked.insert(field.clone());
                }
                None => log::warn!("{}: no label for field '{}'", self.config.name, field),
            }
        }
        Ok(())
    }

    /// Clear the error class from every `{name}_*_label` on the page,
    /// including labels the server rendered already marked.
    fn clear_marks(&self) {
        let prefix = format!("{}_", self.config.name);
        for element in self.dom.elements_by_tag("*") {
            let id = self.dom.id(&element);
            let is_label = id.len() > prefix.len() + "_label".len()
                && id.starts_with(&prefix)
                && id.ends_with("_label");
            if is_label && self.dom.has_class(&element, ERROR_CLASS) {
                self.dom.remove_class(&element, ERROR_CLASS);
            }
        }
        self.marked.borrow_mut().clear();
    }
}
