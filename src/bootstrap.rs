//! Page bootstrap
//!
//! Setup callbacks are collected in an explicit [`StartupRegistry`] owned by
//! whoever drives page load, instead of a process-wide list.

use crate::dom::Dom;

/// Class marking the page's main admin form
pub const WEBUI_FORM_CLASS: &str = "webui";

/// Ordered list of setup callbacks, run once at page load
#[derive(Default)]
pub struct StartupRegistry {
    callbacks: Vec<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for StartupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartupRegistry")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl StartupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: impl FnOnce() + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run every registered callback in registration order. The registry is
    /// empty afterwards, so a second call does nothing.
    pub fn run(&mut self) -> usize {
        let callbacks = std::mem::take(&mut self.callbacks);
        let count = callbacks.len();
        log::debug!("running {} startup callbacks", count);
        for callback in callbacks {
            callback();
        }
        count
    }
}

/// The first `<form class="webui">` on the page
pub fn find_webui_form<D: Dom + ?Sized>(dom: &D) -> Option<D::Node> {
    dom.elements_by_tag("form")
        .into_iter()
        .find(|form| dom.has_class(form, WEBUI_FORM_CLASS))
}

/// Focus the control called `name` inside the webui form. Returns whether a
/// control was found.
pub fn focus_field<D: Dom + ?Sized>(dom: &D, name: &str) -> bool {
    let Some(form) = find_webui_form(dom) else {
        log::warn!("no webui form on this page");
        return false;
    };
    let control = ["input", "select", "textarea"]
        .iter()
        .flat_map(|tag| dom.descendants_by_tag(&form, tag))
        .find(|el| dom.attribute(el, "name").as_deref() == Some(name));
    match control {
        Some(el) => {
            dom.focus(&el);
            true
        }
        None => false,
    }
}
