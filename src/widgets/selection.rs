//! Selection and action-button enablement
//!
//! Shared by the list and icon widgets. The selected set is never stored:
//! an item is selected iff it carries the `active` class, and the set is
//! re-derived from the DOM after every change.

use super::WidgetError;
use crate::dom::Dom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

pub const ACTIVE_CLASS: &str = "active";

/// Inclusive `[min, max]` selection count for which an action is enabled.
/// `max == None` means unbounded.
///
/// Deserializes from a two-element array: `[1, 1]`, `[0, null]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, Option<usize>)", into = "(usize, Option<usize>)")]
pub struct Cardinality {
    pub min: usize,
    pub max: Option<usize>,
}

impl Cardinality {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// `[n, n]`
    pub fn exactly(n: usize) -> Self {
        Self::new(n, Some(n))
    }

    /// `[min, *]`
    pub fn at_least(min: usize) -> Self {
        Self::new(min, None)
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl From<(usize, Option<usize>)> for Cardinality {
    fn from((min, max): (usize, Option<usize>)) -> Self {
        Self::new(min, max)
    }
}

impl From<Cardinality> for (usize, Option<usize>) {
    fn from(c: Cardinality) -> Self {
        (c.min, c.max)
    }
}

/// Action name (the button's `name` attribute) to its cardinality
pub type Actions = HashMap<String, Cardinality>;

/// How an item was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Plain click: toggle the item, deselect everything else
    Click,
    /// Ctrl-click: toggle only the item
    Control,
    /// Double click: select the item, deselect everything else
    DoubleClick,
}

impl FromStr for Modifier {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click" => Ok(Modifier::Click),
            "control" | "ctrl" | "ctrl_click" => Ok(Modifier::Control),
            "dblclick" => Ok(Modifier::DoubleClick),
            other => Err(WidgetError::UnknownModifier(other.to_string())),
        }
    }
}

/// Where a click landed, relative to one widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// On an item; carries the item id (without the widget prefix)
    Item(String),
    /// On the widget container, outside any item
    Background,
    /// Somewhere the widget does not react to
    Outside,
}

/// Selection state machine for the items of one widget
#[derive(Debug, Clone)]
pub struct Selection {
    name: String,
    prefix: String,
    actions: Actions,
}

impl Selection {
    pub fn new(name: &str, actions: Actions) -> Self {
        Self {
            name: name.to_string(),
            prefix: format!("{}_", name),
            actions,
        }
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    /// DOM id for an item: `{name}_{id}`
    pub fn dom_id(&self, id: &str) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Item id from a DOM id, dropping the `{name}_` prefix
    pub fn item_id<'a>(&self, dom_id: &'a str) -> &'a str {
        dom_id.strip_prefix(self.prefix.as_str()).unwrap_or(dom_id)
    }

    pub fn field_id(&self) -> String {
        format!("{}selection", self.prefix)
    }

    pub fn owns(&self, dom_id: &str) -> bool {
        dom_id.starts_with(self.prefix.as_str())
    }

    /// Classify a click by walking up from its target. The first `item_tag`
    /// element decides: one of ours is an item, any other is ignored.
    pub fn resolve_click<D: Dom + ?Sized>(
        &self,
        dom: &D,
        target: &D::Node,
        item_tag: &str,
    ) -> ClickTarget {
        let hit = crate::dom::closest(dom, target, |n| {
            dom.tag_name(n) == item_tag || dom.id(n) == self.name
        });
        match hit {
            Some(node) if dom.tag_name(&node) == item_tag => {
                let dom_id = dom.id(&node);
                if self.owns(&dom_id) {
                    ClickTarget::Item(self.item_id(&dom_id).to_string())
                } else {
                    ClickTarget::Outside
                }
            }
            Some(_) => ClickTarget::Background,
            None => ClickTarget::Outside,
        }
    }

    /// Apply a selection gesture to `items` and return the ids now selected,
    /// in DOM order.
    pub fn select_id<D: Dom + ?Sized>(
        &self,
        dom: &D,
        items: &[D::Node],
        id: &str,
        modifier: Modifier,
    ) -> Vec<String> {
        let mut selected = Vec::new();
        for item in items {
            let dom_id = dom.id(item);
            let item_id = self.item_id(&dom_id);
            if item_id == id {
                if modifier == Modifier::DoubleClick || !dom.has_class(item, ACTIVE_CLASS) {
                    dom.add_class(item, ACTIVE_CLASS);
                } else {
                    dom.remove_class(item, ACTIVE_CLASS);
                }
            } else if modifier != Modifier::Control {
                dom.remove_class(item, ACTIVE_CLASS);
            }
            if dom.has_class(item, ACTIVE_CLASS) {
                selected.push(item_id.to_string());
            }
        }
        selected
    }

    /// Write the selection into the hidden field and enable each action
    /// whose cardinality admits the selected count.
    pub fn publish<D: Dom + ?Sized>(
        &self,
        dom: &D,
        buttons: &[D::Node],
        field: &D::Node,
        selected: &[String],
    ) {
        dom.set_value(field, &selected.join(","));
        let count = selected.len();
        self.refresh_buttons(dom, buttons, |c| c.contains(count));
        log::debug!("{}: {} selected", self.name, count);
    }

    /// Deactivate every item, clear the hidden field, and enable exactly the
    /// actions that need no selection (`min == 0`).
    pub fn clear<D: Dom + ?Sized>(
        &self,
        dom: &D,
        items: &[D::Node],
        buttons: &[D::Node],
        field: &D::Node,
    ) {
        for item in items {
            dom.remove_class(item, ACTIVE_CLASS);
        }
        dom.set_value(field, "");
        self.refresh_buttons(dom, buttons, |c| c.min == 0);
    }

    pub fn selected_ids<D: Dom + ?Sized>(&self, dom: &D, items: &[D::Node]) -> Vec<String> {
        items
            .iter()
            .filter(|item| dom.has_class(item, ACTIVE_CLASS))
            .map(|item| self.item_id(&dom.id(item)).to_string())
            .collect()
    }

    /// `<input type="button">` elements inside `container`
    pub fn buttons<D: Dom + ?Sized>(dom: &D, container: &D::Node) -> Vec<D::Node> {
        dom.descendants_by_tag(container, "input")
            .into_iter()
            .filter(|input| dom.attribute(input, "type").as_deref() == Some("button"))
            .collect()
    }

    fn refresh_buttons<D, F>(&self, dom: &D, buttons: &[D::Node], enabled: F)
    where
        D: Dom + ?Sized,
        F: Fn(&Cardinality) -> bool,
    {
        for button in buttons {
            let name = dom.attribute(button, "name").unwrap_or_default();
            match self.actions.get(&name) {
                Some(cardinality) => dom.set_disabled(button, !enabled(cardinality)),
                None => log::warn!("{}: button '{}' has no configured action", self.name, name),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeId};

    fn grid(dom: &MemoryDom, ids: &[&str]) -> Vec<NodeId> {
        let container = dom.element_with_id(&dom.body(), "div", "lv");
        ids.iter()
            .map(|id| dom.element_with_id(&container, "tr", &format!("lv_{}", id)))
            .collect()
    }

    #[test]
    fn test_cardinality_contains() {
        assert!(Cardinality::exactly(1).contains(1));
        assert!(!Cardinality::exactly(1).contains(0));
        assert!(!Cardinality::exactly(1).contains(2));
        assert!(Cardinality::at_least(0).contains(0));
        assert!(Cardinality::at_least(0).contains(10_000));
        assert!(Cardinality::new(1, Some(3)).contains(3));
    }

    #[test]
    fn test_cardinality_from_json_pair() {
        let actions: Actions =
            serde_json::from_str(r#"{"edit": [1, 1], "add": [0, null]}"#).unwrap();
        assert_eq!(actions["edit"], Cardinality::exactly(1));
        assert_eq!(actions["add"], Cardinality::at_least(0));
    }

    #[test]
    fn test_modifier_parsing() {
        assert_eq!("click".parse::<Modifier>().unwrap(), Modifier::Click);
        assert_eq!("control".parse::<Modifier>().unwrap(), Modifier::Control);
        assert_eq!("dblclick".parse::<Modifier>().unwrap(), Modifier::DoubleClick);
        assert!("hover".parse::<Modifier>().is_err());
    }

    #[test]
    fn test_click_is_single_select_and_toggles() {
        let dom = MemoryDom::new();
        let items = grid(&dom, &["1", "2", "3"]);
        let sel = Selection::new("lv", Actions::new());

        assert_eq!(sel.select_id(&dom, &items, "1", Modifier::Control), vec!["1"]);
        assert_eq!(sel.select_id(&dom, &items, "3", Modifier::Control), vec!["1", "3"]);
        assert_eq!(sel.select_id(&dom, &items, "2", Modifier::Click), vec!["2"]);
        // plain click on the active item deactivates it
        assert!(sel.select_id(&dom, &items, "2", Modifier::Click).is_empty());
    }

    #[test]
    fn test_dblclick_never_deactivates_target() {
        let dom = MemoryDom::new();
        let items = grid(&dom, &["1", "2"]);
        let sel = Selection::new("lv", Actions::new());

        sel.select_id(&dom, &items, "1", Modifier::Control);
        sel.select_id(&dom, &items, "2", Modifier::Control);
        assert_eq!(sel.select_id(&dom, &items, "2", Modifier::DoubleClick), vec!["2"]);
        assert_eq!(sel.select_id(&dom, &items, "2", Modifier::DoubleClick), vec!["2"]);
    }

    #[test]
    fn test_item_ids_keep_underscores() {
        let sel = Selection::new("my_list", Actions::new());
        assert_eq!(sel.item_id("my_list_a_b"), "a_b");
        assert_eq!(sel.dom_id("a_b"), "my_list_a_b");
        assert_eq!(sel.field_id(), "my_list_selection");
    }
}
