//! Paginated list view
//!
//! Expected markup, for a widget named `pages`:
//!
//! ```html
//! <div id="pages" class="listview">
//!   <input type="hidden" id="pages_selection" name="pages_selection">
//!   <span id="pages_start"></span>-<span id="pages_end"></span> of <span id="pages_total"></span>
//!   <table>
//!     <thead>...</thead>
//!     <tbody><tr id="pages_17"><td>...</td></tr>...</tbody>
//!   </table>
//!   <a id="pages_prev">...</a> <a id="pages_next">...</a>
//!   <input type="button" name="edit" value="Edit">
//! </div>
//! ```
//!
//! Rows are fetched a page at a time from `{url}?start=N&pagesize=M` and
//! reconciled into the existing `<tbody>`: rows are rewritten in place,
//! appended, or trimmed from the tail. Only the latest fetch may update the
//! widget; completions of superseded fetches are dropped.

use super::selection::{ClickTarget, Modifier, Selection};
use super::{report, require_element, Actions, WidgetError, WidgetResult};
use crate::dom::{Cursor, Dom};
use crate::transport::{AjaxRequest, Method, Response, Transport};
use crate::xml::{parse_resultset, Record, ResultSet};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub const DEFAULT_PAGE_SIZE: usize = 20;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Construction parameters for a [`ListView`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewConfig {
    /// Container id and id prefix
    pub name: String,
    /// Data source returning `<resultset>` documents
    pub url: String,
    /// Record fields shown, one per table cell
    pub columns: Vec<String>,
    #[serde(default)]
    pub actions: Actions,
    #[serde(default)]
    pub start: usize,
    #[serde(default = "default_page_size", alias = "pagesize")]
    pub page_size: usize,
}

impl ListViewConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Pagination state. `total` stays `None` until the first page arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub start: usize,
    pub page_size: usize,
    pub size: usize,
    pub total: Option<usize>,
    latest_request: u64,
}

struct Inner<D: Dom> {
    dom: D,
    config: ListViewConfig,
    selection: Selection,
    state: RefCell<PageState>,
}

/// List widget bound to one DOM container
pub struct ListView<D: Dom + 'static, T: Transport> {
    inner: Rc<Inner<D>>,
    transport: T,
}

impl<D: Dom + 'static, T: Transport> ListView<D, T> {
    pub fn new(dom: D, transport: T, config: ListViewConfig) -> Self {
        let state = PageState {
            start: config.start,
            page_size: config.page_size,
            size: 0,
            total: None,
            latest_request: 0,
        };
        let selection = Selection::new(&config.name, config.actions.clone());
        Self {
            inner: Rc::new(Inner {
                dom,
                config,
                selection,
                state: RefCell::new(state),
            }),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn dom(&self) -> &D {
        &self.inner.dom
    }

    pub fn state(&self) -> PageState {
        *self.inner.state.borrow()
    }

    pub fn start(&self) -> usize {
        self.state().start
    }

    pub fn page_size(&self) -> usize {
        self.state().page_size
    }

    pub fn total(&self) -> Option<usize> {
        self.state().total
    }

    /// Load the configured first page
    pub fn initialize(&self) {
        let PageState {
            start, page_size, ..
        } = self.state();
        self.update(start, page_size);
    }

    /// Fetch a page. The body cursor shows busy until the page is applied.
    pub fn update(&self, start: usize, page_size: usize) {
        let seq = {
            let mut state = self.inner.state.borrow_mut();
            state.latest_request += 1;
            state.latest_request
        };
        let url = self.inner.page_url(start, page_size);
        log::debug!("{}: fetching page #{} from {}", self.name(), seq, url);

        let on_loaded: Weak<Inner<D>> = Rc::downgrade(&self.inner);
        let on_failed = on_loaded.clone();
        let request = AjaxRequest::new(
            move |response| {
                if let Some(inner) = on_loaded.upgrade() {
                    inner.page_loaded(seq, &response);
                }
            },
            move |response| {
                if let Some(inner) = on_failed.upgrade() {
                    inner.page_failed(seq, &response);
                }
            },
        );

        self.inner.dom.set_cursor(Cursor::Busy);
        if let Err(e) = request.start(&self.transport, &url, Method::Get, None) {
            report(&self.inner.dom, &WidgetError::from(e));
        }
    }

    /// Go back one page. Returns whether a fetch was issued.
    pub fn prevpage(&self) -> bool {
        let state = self.state();
        if state.start == 0 {
            return false;
        }
        self.update(state.start.saturating_sub(state.page_size), state.page_size);
        true
    }

    /// Go forward one page. Returns whether a fetch was issued.
    pub fn nextpage(&self) -> bool {
        let state = self.state();
        let Some(total) = state.total else {
            // first page not loaded yet
            return false;
        };
        let next_start = state.start.saturating_add(state.page_size);
        if next_start >= total {
            return false;
        }
        self.update(next_start, state.page_size);
        true
    }

    pub fn select_id(&self, id: &str, modifier: Modifier) {
        if let Err(e) = self.inner.select_id(id, modifier) {
            report(&self.inner.dom, &e);
        }
    }

    pub fn deselect(&self) {
        if let Err(e) = self.inner.deselect() {
            report(&self.inner.dom, &e);
        }
    }

    /// Route a click: a row selects (`ctrl` for multi-select), the bare
    /// container deselects.
    pub fn handle_click(&self, target: &D::Node, ctrl: bool) {
        match self.inner.selection.resolve_click(&self.inner.dom, target, "tr") {
            ClickTarget::Item(id) => {
                let modifier = if ctrl { Modifier::Control } else { Modifier::Click };
                self.select_id(&id, modifier);
            }
            ClickTarget::Background => self.deselect(),
            ClickTarget::Outside => {}
        }
    }

    pub fn handle_dblclick(&self, target: &D::Node) {
        let hit = self.inner.selection.resolve_click(&self.inner.dom, target, "tr");
        if let ClickTarget::Item(id) = hit {
            self.select_id(&id, Modifier::DoubleClick);
        }
    }

    /// Ids of the active rows, in table order
    pub fn selected_ids(&self) -> Vec<String> {
        match self.inner.rows() {
            Ok(rows) => self.inner.selection.selected_ids(&self.inner.dom, &rows),
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        }
    }
}

impl<D: Dom> Inner<D> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn page_url(&self, start: usize, page_size: usize) -> String {
        let separator = if self.config.url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}start={}&pagesize={}",
            self.config.url, separator, start, page_size
        )
    }

    fn is_current(&self, seq: u64) -> bool {
        let latest = self.state.borrow().latest_request;
        if seq != latest {
            log::debug!("{}: dropping response #{} (latest is #{})", self.name(), seq, latest);
        }
        seq == latest
    }

    fn page_loaded(&self, seq: u64, response: &Response) {
        if !self.is_current(seq) {
            return;
        }
        match self.apply_page(&response.body) {
            Ok(()) => self.dom.set_cursor(Cursor::Default),
            Err(e) => report(&self.dom, &e),
        }
    }

    /// The busy cursor is left in place on failure
    fn page_failed(&self, seq: u64, response: &Response) {
        if !self.is_current(seq) {
            return;
        }
        report(&self.dom, &WidgetError::Fetch(response.status));
    }

    fn apply_page(&self, body: &str) -> WidgetResult<()> {
        let result: ResultSet = parse_resultset(body).map_err(WidgetError::Parse)?;
        self.reconcile(&result.rows)?;
        {
            let mut state = self.state.borrow_mut();
            state.start = result.start;
            state.size = result.size;
            state.total = Some(result.total);
        }
        self.update_links()?;
        self.update_heading()?;
        log::debug!(
            "{}: showing {} rows from {} of {}",
            self.name(),
            result.rows.len(),
            result.start,
            result.total
        );
        Ok(())
    }

    fn container(&self) -> WidgetResult<D::Node> {
        self.dom
            .element_by_id(self.name())
            .ok_or(WidgetError::MissingContainer { widget: "listview" })
    }

    fn tbody(&self) -> WidgetResult<D::Node> {
        let container = self.container()?;
        self.dom
            .descendants_by_tag(&container, "tbody")
            .into_iter()
            .next()
            .ok_or(WidgetError::MissingTableBody)
    }

    fn rows(&self) -> WidgetResult<Vec<D::Node>> {
        let tbody = self.tbody()?;
        Ok(self.dom.descendants_by_tag(&tbody, "tr"))
    }

    /// Rewrite rows in place, append what is missing, trim the tail
    fn reconcile(&self, records: &[Record]) -> WidgetResult<()> {
        let tbody = self.tbody()?;
        let rows = self.dom.descendants_by_tag(&tbody, "tr");

        for (i, record) in records.iter().enumerate() {
            let row = match rows.get(i) {
                Some(row) => row.clone(),
                None => self.append_row(&tbody)?,
            };
            // a malformed row is reported and the rest of the page still applies
            if let Err(e) = self.update_row(&row, record) {
                report(&self.dom, &e);
            }
        }
        for row in rows.iter().skip(records.len()).rev() {
            self.dom.remove_child(&tbody, row);
        }
        Ok(())
    }

    fn append_row(&self, tbody: &D::Node) -> WidgetResult<D::Node> {
        let row = self
            .dom
            .create_element("tr")
            .ok_or(WidgetError::CreateElement("tr"))?;
        self.dom.set_attribute(&row, "style", "cursor: pointer");
        for _ in &self.config.columns {
            let cell = self
                .dom
                .create_element("td")
                .ok_or(WidgetError::CreateElement("td"))?;
            self.dom.append_child(&row, &cell);
        }
        self.dom.append_child(tbody, &row);
        Ok(row)
    }

    /// Missing or empty values leave the cell's previous text in place
    fn update_row(&self, row: &D::Node, record: &Record) -> WidgetResult<()> {
        let cells = self.dom.descendants_by_tag(row, "td");
        if cells.len() != self.config.columns.len() {
            return Err(WidgetError::CellCountMismatch {
                expected: self.config.columns.len(),
                found: cells.len(),
            });
        }
        let id = record.get("id").map(String::as_str).unwrap_or_default();
        self.dom.set_id(row, &self.selection.dom_id(id));
        for (cell, column) in cells.iter().zip(&self.config.columns) {
            match record.get(column) {
                Some(value) if !value.is_empty() => self.dom.set_text(cell, value),
                _ => {}
            }
        }
        Ok(())
    }

    fn update_links(&self) -> WidgetResult<()> {
        let state = *self.state.borrow();
        let total = state.total.unwrap_or(0);
        let visibility = |shown: bool| {
            if shown {
                "display: table-cell"
            } else {
                "display: none"
            }
        };

        let prev = require_element(&self.dom, &format!("{}_prev", self.name()))?;
        self.dom.set_attribute(&prev, "style", visibility(state.start > 0));
        let next = require_element(&self.dom, &format!("{}_next", self.name()))?;
        let has_next = state.start.saturating_add(state.size) < total;
        self.dom.set_attribute(&next, "style", visibility(has_next));
        Ok(())
    }

    fn update_heading(&self) -> WidgetResult<()> {
        let state = *self.state.borrow();
        let fields = [
            ("start", state.start.saturating_add(1)),
            ("end", state.start.saturating_add(state.size)),
            ("total", state.total.unwrap_or(0)),
        ];
        for (suffix, value) in fields {
            let node = require_element(&self.dom, &format!("{}_{}", self.name(), suffix))?;
            self.dom.set_text(&node, &value.to_string());
        }
        Ok(())
    }

    fn selection_field(&self) -> WidgetResult<D::Node> {
        require_element(&self.dom, &self.selection.field_id())
    }

    fn select_id(&self, id: &str, modifier: Modifier) -> WidgetResult<()> {
        let rows = self.rows()?;
        let field = self.selection_field()?;
        let buttons = Selection::buttons(&self.dom, &self.container()?);
        let selected = self.selection.select_id(&self.dom, &rows, id, modifier);
        self.selection.publish(&self.dom, &buttons, &field, &selected);
        Ok(())
    }

    fn deselect(&self) -> WidgetResult<()> {
        let rows = self.rows()?;
        let field = self.selection_field()?;
        let buttons = Selection::buttons(&self.dom, &self.container()?);
        self.selection.clear(&self.dom, &rows, &buttons, &field);
        Ok(())
    }
}
