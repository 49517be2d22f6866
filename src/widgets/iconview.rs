//! Icon grid
//!
//! The items are the `<td>` cells inside the `{name}` container whose id
//! carries the `{name}_` prefix. Selection and action enablement work exactly
//! as in the list view; there is no paging.

use super::selection::{ClickTarget, Modifier, Selection};
use super::{report, require_element, Actions, WidgetError, WidgetResult};
use crate::dom::Dom;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconViewConfig {
    pub name: String,
    #[serde(default)]
    pub actions: Actions,
}

impl IconViewConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub struct IconView<D: Dom> {
    dom: D,
    name: String,
    selection: Selection,
}

impl<D: Dom> IconView<D> {
    pub fn new(dom: D, config: IconViewConfig) -> Self {
        let selection = Selection::new(&config.name, config.actions);
        Self {
            dom,
            name: config.name,
            selection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn select_id(&self, id: &str, modifier: Modifier) {
        if let Err(e) = self.try_select_id(id, modifier) {
            report(&self.dom, &e);
        }
    }

    pub fn deselect(&self) {
        if let Err(e) = self.try_deselect() {
            report(&self.dom, &e);
        }
    }

    pub fn handle_click(&self, target: &D::Node, ctrl: bool) {
        match self.selection.resolve_click(&self.dom, target, "td") {
            ClickTarget::Item(id) => {
                let modifier = if ctrl { Modifier::Control } else { Modifier::Click };
                self.select_id(&id, modifier);
            }
            ClickTarget::Background => self.deselect(),
            ClickTarget::Outside => {}
        }
    }

    pub fn handle_dblclick(&self, target: &D::Node) {
        if let ClickTarget::Item(id) = self.selection.resolve_click(&self.dom, target, "td") {
            self.select_id(&id, Modifier::DoubleClick);
        }
    }

    pub fn selected_ids(&self) -> Vec<String> {
        match self.items() {
            Ok(items) => self.selection.selected_ids(&self.dom, &items),
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        }
    }

    fn container(&self) -> WidgetResult<D::Node> {
        self.dom
            .element_by_id(&self.name)
            .ok_or(WidgetError::MissingContainer { widget: "iconview" })
    }

    fn items(&self) -> WidgetResult<Vec<D::Node>> {
        let container = self.container()?;
        Ok(self
            .dom
            .descendants_by_tag(&container, "td")
            .into_iter()
            .filter(|cell| self.selection.owns(&self.dom.id(cell)))
            .collect())
    }

    fn try_select_id(&self, id: &str, modifier: Modifier) -> WidgetResult<()> {
        let items = self.items()?;
        let field = require_element(&self.dom, &self.selection.field_id())?;
        let buttons = Selection::buttons(&self.dom, &self.container()?);
        let selected = self.selection.select_id(&self.dom, &items, id, modifier);
        self.selection.publish(&self.dom, &buttons, &field, &selected);
        Ok(())
    }

    fn try_deselect(&self) -> WidgetResult<()> {
        let items = self.items()?;
        let field = require_element(&self.dom, &self.selection.field_id())?;
        let buttons = Selection::buttons(&self.dom, &self.container()?);
        self.selection.clear(&self.dom, &items, &buttons, &field);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeId};
    use std::rc::Rc;

    struct Grid {
        dom: Rc<MemoryDom>,
        view: IconView<Rc<MemoryDom>>,
        field: NodeId,
        open: NodeId,
        icons: Vec<NodeId>,
    }

    fn grid() -> Grid {
        let dom = Rc::new(MemoryDom::new());
        let container = dom.element_with_id(&dom.body(), "div", "icons");
        let field = dom.element_with_id(&container, "input", "icons_selection");
        dom.set_attribute(&field, "type", "hidden");
        let table = dom.element(&container, "table");
        let tr = dom.element(&table, "tr");
        let icons = ["docs", "images", "trash"]
            .iter()
            .map(|id| {
                let td = dom.element_with_id(&tr, "td", &format!("icons_{}", id));
                dom.element(&td, "img");
                td
            })
            .collect();
        // a plain cell that is not an icon
        dom.element(&tr, "td");
        let open = dom.element(&container, "input");
        dom.set_attribute(&open, "type", "button");
        dom.set_attribute(&open, "name", "open");

        let config =
            IconViewConfig::from_json(r#"{"name": "icons", "actions": {"open": [1, 1]}}"#).unwrap();
        let view = IconView::new(dom.clone(), config);
        Grid {
            dom,
            view,
            field,
            open,
            icons,
        }
    }

    #[test]
    fn test_click_on_icon_image_selects_cell() {
        let g = grid();
        let img = g.dom.children(&g.icons[1])[0];

        g.view.handle_click(&img, false);

        assert_eq!(g.view.selected_ids(), vec!["images"]);
        assert_eq!(g.dom.value(&g.field), "images");
        assert!(!g.dom.is_disabled(&g.open));
    }

    #[test]
    fn test_ctrl_click_multi_select_disables_single_action() {
        let g = grid();
        g.view.handle_click(&g.icons[0], true);
        g.view.handle_click(&g.icons[2], true);

        assert_eq!(g.view.selected_ids(), vec!["docs", "trash"]);
        assert_eq!(g.dom.value(&g.field), "docs,trash");
        assert!(g.dom.is_disabled(&g.open));
    }

    #[test]
    fn test_background_click_deselects() {
        let g = grid();
        g.view.select_id("docs", Modifier::DoubleClick);
        let container = g.dom.element_by_id("icons").unwrap();

        g.view.handle_click(&container, false);

        assert!(g.view.selected_ids().is_empty());
        assert_eq!(g.dom.value(&g.field), "");
        assert!(g.dom.is_disabled(&g.open));
    }

    #[test]
    fn test_missing_container_alerts() {
        let dom = Rc::new(MemoryDom::new());
        let view = IconView::new(
            dom.clone(),
            IconViewConfig {
                name: "nowhere".into(),
                actions: Actions::new(),
            },
        );
        view.select_id("x", Modifier::Click);
        assert_eq!(dom.alerts(), vec!["Could not load iconview DOM node."]);
    }
}
