//! `<formresult>` parsing

use super::{expect_root, leaf_text, parse_document, XmlError, XmlResult};
use serde::Serialize;

/// Server verdict on a form submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormResult {
    pub status: String,
    pub message: String,
    /// Names of the fields in error, in document order
    pub fields: Vec<String>,
}

impl FormResult {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Parse a `<formresult>` document.
///
/// Only `status`, `message` and `field` children are accepted, each holding a
/// single text value. Whitespace between them and comments are ignored; any
/// other text directly under the root is an error. `status` and `message`
/// must both be present and non-empty.
pub fn parse_formresult(xml: &str) -> XmlResult<FormResult> {
    let doc = parse_document(xml)?;
    let root = expect_root(&doc, "formresult")?;

    let mut status: Option<String> = None;
    let mut message: Option<String> = None;
    let mut fields = Vec::new();

    for node in root.children() {
        if node.is_text() {
            let text = node.text().unwrap_or_default();
            if text.trim().is_empty() {
                continue;
            }
            return Err(XmlError::UnexpectedText(text.to_string()));
        }
        if !node.is_element() {
            continue;
        }
        let name = node.tag_name().name();
        let value = leaf_text(node).ok_or_else(|| XmlError::NotLeaf(name.to_string()))?;
        match name {
            "status" => status = Some(value.to_string()),
            "message" => message = Some(value.to_string()),
            "field" => fields.push(value.to_string()),
            other => return Err(XmlError::UnexpectedElement(other.to_string())),
        }
    }

    let status = status
        .filter(|s| !s.is_empty())
        .ok_or(XmlError::MissingElement("status"))?;
    let message = message
        .filter(|m| !m.is_empty())
        .ok_or(XmlError::MissingElement("message"))?;

    Ok(FormResult {
        status,
        message,
        fields,
    })
}
