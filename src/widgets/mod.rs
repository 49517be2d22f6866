//! Client-side widgets
//!
//! Each widget owns one DOM subtree, identified by a unique name used as the
//! container id and as the prefix of every id inside it. Failures never
//! escape a widget operation: they are logged and shown to the user through
//! [`Dom::alert`].

pub mod form;
pub mod iconview;
pub mod listview;
pub mod selection;

pub use form::{FormConfig, FormController, FormError};
pub use iconview::{IconView, IconViewConfig};
pub use listview::{ListView, ListViewConfig, PageState};
pub use selection::{Actions, Cardinality, Modifier, Selection};

use crate::dom::Dom;
use crate::transport::TransportError;
use crate::xml::XmlError;
use std::fmt::Display;
use thiserror::Error;

/// Widget failures. The `Display` text is what the user sees.
#[derive(Debug, Clone, Error)]
pub enum WidgetError {
    #[error("Could not load {widget} DOM node.")]
    MissingContainer { widget: &'static str },

    #[error("Could not load table body DOM node.")]
    MissingTableBody,

    #[error("Missing DOM node: {0}")]
    MissingElement(String),

    #[error("Could not create <{0}> element.")]
    CreateElement(&'static str),

    #[error("Cannot update row with wrong # of cells.")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("Could not parse XML response.")]
    Parse(#[source] XmlError),

    #[error("Could not load XML data source. Server response was: {0}")]
    Fetch(u16),

    #[error("Could not load XML data source. {0}")]
    Transport(#[from] TransportError),

    #[error("Unknown selection modifier '{0}'")]
    UnknownModifier(String),
}

pub type WidgetResult<T> = Result<T, WidgetError>;

/// Log a failure and show it to the user
pub(crate) fn report<D: Dom + ?Sized>(dom: &D, err: &impl Display) {
    log::error!("{}", err);
    dom.alert(&err.to_string());
}

pub(crate) fn require_element<D: Dom + ?Sized>(dom: &D, id: &str) -> WidgetResult<D::Node> {
    dom.element_by_id(id)
        .ok_or_else(|| WidgetError::MissingElement(id.to_string()))
}
