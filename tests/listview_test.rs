// List view paging, reconciliation and selection against the in-memory DOM

use std::rc::Rc;
use webui_wasm::dom::{Cursor, Dom, MemoryDom, NodeId};
use webui_wasm::transport::{Method, QueuedTransport, Response};
use webui_wasm::widgets::{ListView, ListViewConfig, Modifier};

type TestView = ListView<Rc<MemoryDom>, QueuedTransport>;

struct Page {
    dom: Rc<MemoryDom>,
    transport: QueuedTransport,
    view: TestView,
    container: NodeId,
    tbody: NodeId,
}

impl Page {
    fn rows(&self) -> Vec<NodeId> {
        self.dom.descendants_by_tag(&self.tbody, "tr")
    }

    fn cell_texts(&self, row: &NodeId) -> Vec<String> {
        self.dom
            .descendants_by_tag(row, "td")
            .iter()
            .map(|td| self.dom.text(td))
            .collect()
    }

    fn text_of(&self, id: &str) -> String {
        let node = self.dom.element_by_id(id).expect("element should exist");
        self.dom.text(&node)
    }

    fn style_of(&self, id: &str) -> String {
        let node = self.dom.element_by_id(id).expect("element should exist");
        self.dom.attribute(&node, "style").unwrap_or_default()
    }

    fn button(&self, name: &str) -> NodeId {
        self.dom
            .descendants_by_tag(&self.container, "input")
            .into_iter()
            .find(|b| self.dom.attribute(b, "name").as_deref() == Some(name))
            .expect("button should exist")
    }

    fn selection_value(&self) -> String {
        let field = self.dom.element_by_id("lv_selection").expect("selection field");
        self.dom.value(&field)
    }

    fn respond(&self, xml: &str) {
        assert!(self.transport.complete_next(Response::new(200, xml)));
    }
}

fn setup() -> Page {
    let dom = Rc::new(MemoryDom::new());
    let body = dom.body();
    let container = dom.element_with_id(&body, "div", "lv");

    let field = dom.element_with_id(&container, "input", "lv_selection");
    dom.set_attribute(&field, "type", "hidden");
    dom.element_with_id(&container, "span", "lv_start");
    dom.element_with_id(&container, "span", "lv_end");
    dom.element_with_id(&container, "span", "lv_total");

    let table = dom.element(&container, "table");
    let thead = dom.element(&table, "thead");
    dom.element(&thead, "tr");
    let tbody = dom.element(&table, "tbody");

    dom.element_with_id(&container, "a", "lv_prev");
    dom.element_with_id(&container, "a", "lv_next");
    for name in ["edit", "delete", "add"] {
        let button = dom.element(&container, "input");
        dom.set_attribute(&button, "type", "button");
        dom.set_attribute(&button, "name", name);
    }

    let config = ListViewConfig::from_json(
        r#"{
            "name": "lv",
            "url": "/pages.xml",
            "columns": ["id", "title"],
            "actions": {"edit": [1, 1], "delete": [1, null], "add": [0, null]},
            "pageSize": 10
        }"#,
    )
    .expect("config should parse");

    let transport = QueuedTransport::new();
    let view = ListView::new(dom.clone(), transport.clone(), config);
    Page {
        dom,
        transport,
        view,
        container,
        tbody,
    }
}

fn resultset(start: usize, total: usize, ids: &[u32]) -> String {
    let rows: String = ids
        .iter()
        .map(|id| format!("<result><id>{id}</id><title>Page {id}</title></result>"))
        .collect();
    format!(
        r#"<resultset start="{}" size="{}" total="{}">{}</resultset>"#,
        start,
        ids.len(),
        total,
        rows
    )
}

#[test]
fn test_initialize_fetches_configured_page() {
    let page = setup();
    page.view.initialize();

    let requests = page.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, "/pages.xml?start=0&pagesize=10");
    assert_eq!(requests[0].body, None);
    assert_eq!(page.dom.cursor(), Cursor::Busy);
}

#[test]
fn test_first_page_fills_table_heading_and_links() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 25, &[1, 2, 3]));

    let rows = page.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(page.dom.id(&rows[0]), "lv_1");
    assert_eq!(page.dom.id(&rows[2]), "lv_3");
    assert_eq!(page.cell_texts(&rows[1]), vec!["2", "Page 2"]);
    assert_eq!(
        page.dom.attribute(&rows[0], "style").as_deref(),
        Some("cursor: pointer")
    );

    assert_eq!(page.text_of("lv_start"), "1");
    assert_eq!(page.text_of("lv_end"), "3");
    assert_eq!(page.text_of("lv_total"), "25");
    assert_eq!(page.style_of("lv_prev"), "display: none");
    assert_eq!(page.style_of("lv_next"), "display: table-cell");

    assert_eq!(page.view.total(), Some(25));
    assert_eq!(page.dom.cursor(), Cursor::Default);
    assert!(page.dom.alerts().is_empty());
}

#[test]
fn test_rows_are_reused_then_appended_then_trimmed() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 5, &[1, 2, 3]));
    let first = page.rows();

    page.view.update(0, 10);
    page.respond(&resultset(0, 5, &[11, 12, 13, 14, 15]));
    let grown = page.rows();
    assert_eq!(grown.len(), 5);
    assert_eq!(&grown[..3], &first[..]);
    assert_eq!(page.dom.id(&grown[0]), "lv_11");
    assert_eq!(page.cell_texts(&grown[4]), vec!["15", "Page 15"]);

    page.view.update(0, 10);
    page.respond(&resultset(0, 2, &[21, 22]));
    let shrunk = page.rows();
    assert_eq!(shrunk.len(), 2);
    assert_eq!(&shrunk[..], &first[..2]);
    assert_eq!(page.cell_texts(&shrunk[1]), vec!["22", "Page 22"]);
}

#[test]
fn test_missing_or_empty_values_keep_previous_cell_text() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 1, &[7]));

    page.view.update(0, 10);
    page.respond(
        r#"<resultset start="0" size="1" total="1">
             <result><id>8</id><title></title></result>
           </resultset>"#,
    );
    let rows = page.rows();
    assert_eq!(page.dom.id(&rows[0]), "lv_8");
    assert_eq!(page.cell_texts(&rows[0]), vec!["8", "Page 7"]);
}

#[test]
fn test_paging_respects_bounds() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 15, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));

    assert!(!page.view.prevpage());
    assert!(page.view.nextpage());
    assert_eq!(
        page.transport.requests().last().map(|r| r.url.clone()),
        Some("/pages.xml?start=10&pagesize=10".to_string())
    );
    page.respond(&resultset(10, 15, &[11, 12, 13, 14, 15]));

    assert_eq!(page.view.start(), 10);
    assert_eq!(page.style_of("lv_prev"), "display: table-cell");
    assert_eq!(page.style_of("lv_next"), "display: none");
    assert_eq!(page.text_of("lv_start"), "11");
    assert_eq!(page.text_of("lv_end"), "15");

    assert!(!page.view.nextpage());
    assert!(page.view.prevpage());
    assert_eq!(
        page.transport.requests().last().map(|r| r.url.clone()),
        Some("/pages.xml?start=0&pagesize=10".to_string())
    );
    assert_eq!(page.transport.requests().len(), 3);
}

#[test]
fn test_superseded_response_is_dropped() {
    let page = setup();
    page.view.update(0, 10);
    page.view.update(10, 10);
    assert_eq!(page.transport.pending_count(), 2);

    // the older fetch finishes first
    page.respond(&resultset(0, 30, &[1, 2]));
    assert!(page.rows().is_empty());
    assert_eq!(page.view.total(), None);
    assert_eq!(page.dom.cursor(), Cursor::Busy);

    page.respond(&resultset(10, 30, &[11, 12, 13]));
    assert_eq!(page.rows().len(), 3);
    assert_eq!(page.view.start(), 10);
    assert_eq!(page.dom.cursor(), Cursor::Default);
}

#[test]
fn test_late_response_of_superseded_fetch_is_dropped() {
    let page = setup();
    page.view.update(0, 10);
    page.view.update(10, 10);

    assert!(page
        .transport
        .complete_latest(Response::new(200, resultset(10, 30, &[11, 12, 13]))));
    assert_eq!(page.view.start(), 10);
    assert_eq!(page.dom.cursor(), Cursor::Default);

    // the older fetch arrives after the newer one was applied
    page.respond(&resultset(0, 30, &[1, 2]));
    let rows = page.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(page.dom.id(&rows[0]), "lv_11");
    assert_eq!(page.view.start(), 10);
    assert_eq!(page.text_of("lv_start"), "11");
    assert_eq!(page.transport.pending_count(), 0);
}

#[test]
fn test_huge_server_offsets_do_not_overflow() {
    let page = setup();
    page.view.initialize();
    let start = usize::MAX.to_string();
    page.respond(&format!(
        r#"<resultset start="{}" size="1" total="0">
             <result><id>1</id><title>x</title></result>
           </resultset>"#,
        start
    ));

    assert!(page.dom.alerts().is_empty());
    assert_eq!(page.dom.cursor(), Cursor::Default);
    assert_eq!(page.text_of("lv_start"), start);
    assert_eq!(page.text_of("lv_end"), start);
    assert_eq!(page.text_of("lv_total"), "0");
    assert_eq!(page.style_of("lv_prev"), "display: table-cell");
    assert_eq!(page.style_of("lv_next"), "display: none");
    assert!(!page.view.nextpage());
}

#[test]
fn test_row_with_wrong_cell_count_is_skipped() {
    let page = setup();
    // a stale row left with one cell while the view has two columns
    let stale = page.dom.element(&page.tbody, "tr");
    page.dom.element(&stale, "td");

    page.view.initialize();
    page.respond(&resultset(0, 3, &[1, 2, 3]));

    assert_eq!(page.dom.alerts(), vec!["Cannot update row with wrong # of cells."]);
    let rows = page.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], stale);
    assert_eq!(page.dom.id(&rows[0]), "");
    assert_eq!(page.cell_texts(&rows[1]), vec!["2", "Page 2"]);
    assert_eq!(page.cell_texts(&rows[2]), vec!["3", "Page 3"]);
    assert_eq!(page.view.total(), Some(3));
    assert_eq!(page.text_of("lv_end"), "3");
    assert_eq!(page.dom.cursor(), Cursor::Default);
}

#[test]
fn test_failed_fetch_alerts_and_stays_busy() {
    let page = setup();
    page.view.initialize();
    assert!(page.transport.complete_next(Response::new(500, "boom")));

    assert_eq!(
        page.dom.alerts(),
        vec!["Could not load XML data source. Server response was: 500"]
    );
    assert_eq!(page.dom.cursor(), Cursor::Busy);
    assert!(page.rows().is_empty());
}

#[test]
fn test_unparseable_page_alerts() {
    let page = setup();
    page.view.initialize();
    page.respond("<results/>");

    assert_eq!(page.dom.alerts(), vec!["Could not parse XML response."]);
    assert_eq!(page.dom.cursor(), Cursor::Busy);
    assert_eq!(page.view.total(), None);
}

#[test]
fn test_missing_container_alerts() {
    let dom = Rc::new(MemoryDom::new());
    let transport = QueuedTransport::new();
    let config = ListViewConfig::from_json(r#"{"name": "ghost", "url": "/x", "columns": ["id"]}"#)
        .expect("config should parse");
    let view = ListView::new(dom.clone(), transport.clone(), config);

    view.initialize();
    assert!(transport.complete_next(Response::new(200, resultset(0, 1, &[1]))));
    assert_eq!(dom.alerts(), vec!["Could not load listview DOM node."]);
}

#[test]
fn test_click_selection_drives_action_buttons() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 3, &[1, 2, 3]));
    let rows = page.rows();

    // click lands on a cell inside the second row
    let cell = page.dom.descendants_by_tag(&rows[1], "td")[1];
    page.view.handle_click(&cell, false);
    assert_eq!(page.view.selected_ids(), vec!["2"]);
    assert_eq!(page.selection_value(), "2");
    assert!(!page.dom.is_disabled(&page.button("edit")));
    assert!(!page.dom.is_disabled(&page.button("delete")));
    assert!(!page.dom.is_disabled(&page.button("add")));

    page.view.handle_click(&rows[2], true);
    assert_eq!(page.selection_value(), "2,3");
    assert!(page.dom.is_disabled(&page.button("edit")));
    assert!(!page.dom.is_disabled(&page.button("delete")));

    // plain click collapses to one row
    page.view.handle_click(&rows[0], false);
    assert_eq!(page.view.selected_ids(), vec!["1"]);
}

#[test]
fn test_control_click_toggles_and_dblclick_keeps_selected() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 3, &[1, 2, 3]));

    page.view.select_id("1", Modifier::Control);
    page.view.select_id("3", Modifier::Control);
    assert_eq!(page.view.selected_ids(), vec!["1", "3"]);
    page.view.select_id("1", Modifier::Control);
    assert_eq!(page.view.selected_ids(), vec!["3"]);

    let rows = page.rows();
    page.view.handle_dblclick(&rows[2]);
    assert_eq!(page.view.selected_ids(), vec!["3"]);
    page.view.handle_dblclick(&rows[2]);
    assert_eq!(page.view.selected_ids(), vec!["3"]);
}

#[test]
fn test_background_click_deselects() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 3, &[1, 2, 3]));
    page.view.select_id("2", Modifier::Click);

    page.view.handle_click(&page.container, false);
    assert!(page.view.selected_ids().is_empty());
    assert_eq!(page.selection_value(), "");
    assert!(page.dom.is_disabled(&page.button("edit")));
    assert!(page.dom.is_disabled(&page.button("delete")));
    assert!(!page.dom.is_disabled(&page.button("add")));
}

#[test]
fn test_header_row_click_is_ignored() {
    let page = setup();
    page.view.initialize();
    page.respond(&resultset(0, 3, &[1, 2, 3]));
    page.view.select_id("2", Modifier::Click);

    let header = page.dom.elements_by_tag("thead")[0];
    let header_row = page.dom.descendants_by_tag(&header, "tr")[0];
    page.view.handle_click(&header_row, false);
    assert_eq!(page.view.selected_ids(), vec!["2"]);
}
