//! Server payload parsing
//!
//! Two XML documents come back from the server:
//!
//! ```text
//! <resultset start="0" size="2" total="5"><result><id>1</id>...</result>...</resultset>
//! <formresult><status>ok</status><message>...</message><field>email</field>...</formresult>
//! ```
//!
//! Both parsers are all-or-nothing: one malformed element rejects the whole
//! document.

pub mod formresult;
pub mod resultset;

pub use formresult::{parse_formresult, FormResult};
pub use resultset::{parse_resultset, Record, ResultSet};

use roxmltree::Node;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("Attribute '{name}' is missing or not a non-negative integer: {value:?}")]
    InvalidAttribute {
        name: &'static str,
        value: Option<String>,
    },

    #[error("Element <{0}> does not hold a single text value")]
    NotLeaf(String),

    #[error("Unexpected element <{0}>")]
    UnexpectedElement(String),

    #[error("Unexpected text content: {0:?}")]
    UnexpectedText(String),

    #[error("Missing required element <{0}>")]
    MissingElement(&'static str),
}

pub type XmlResult<T> = Result<T, XmlError>;

pub(crate) fn parse_document(xml: &str) -> XmlResult<roxmltree::Document<'_>> {
    roxmltree::Document::parse(xml).map_err(|e| XmlError::InvalidXml(e.to_string()))
}

pub(crate) fn expect_root<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    expected: &'static str,
) -> XmlResult<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != expected {
        return Err(XmlError::UnexpectedRoot {
            expected,
            found: root.tag_name().name().to_string(),
        });
    }
    Ok(root)
}

/// Text of an element holding at most one text child.
///
/// No children gives `""`. A single text child gives its text. Any other
/// shape (a nested element, a comment, several nodes) gives `None`.
pub fn leaf_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let mut children = node.children();
    match (children.next(), children.next()) {
        (None, _) => Some(""),
        (Some(only), None) if only.is_text() => only.text(),
        _ => None,
    }
}
