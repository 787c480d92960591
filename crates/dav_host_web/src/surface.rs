//! Listing rows rendered as `<li>` children of a list element.

use dav_host::{Entry, FocusSurface, ListSurface};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use crate::dom;

/// CSS class list for a listing row.
pub fn row_class(is_directory: bool) -> &'static str {
    if is_directory {
        "dav-entry dav-entry--directory"
    } else {
        "dav-entry dav-entry--file"
    }
}

#[derive(Debug, Clone)]
/// List and focus surface over the element with id `list_id`.
///
/// Each entry becomes a focusable `<li>` carrying its name in `data-name`. Focus lookups treat a
/// row as focused when it or one of its descendants is the active element.
pub struct DomListSurface {
    list_id: String,
}

impl DomListSurface {
    /// Renders into the element with id `list_id`.
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
        }
    }

    /// Id of the list element.
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    #[cfg(target_arch = "wasm32")]
    fn rows(&self) -> Vec<web_sys::HtmlElement> {
        let Ok(list) = dom::html_element_by_id(&self.list_id) else {
            return Vec::new();
        };
        let Ok(nodes) = list.query_selector_all(":scope > li") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .collect()
    }

    #[cfg(target_arch = "wasm32")]
    fn append_row(&self, entry: &Entry) -> Result<(), String> {
        let list = dom::html_element_by_id(&self.list_id)?;
        let row = dom::document()?
            .create_element("li")
            .map_err(|err| dom::js_error("create row", err))?;
        row.set_class_name(row_class(entry.is_directory()));
        row.set_attribute("tabindex", "0")
            .and_then(|_| row.set_attribute("data-name", entry.name()))
            .map_err(|err| dom::js_error("row attributes", err))?;
        row.set_text_content(Some(entry.name()));
        list.append_child(&row)
            .map_err(|err| dom::js_error("append row", err))?;
        Ok(())
    }
}

impl Default for DomListSurface {
    fn default() -> Self {
        Self::new("dav-list")
    }
}

impl ListSurface for DomListSurface {
    fn set_loading(&self, loading: bool) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Ok(list) = dom::html_element_by_id(&self.list_id) {
                let _ = list.class_list().toggle_with_force("is-loading", loading);
                let _ = list.set_attribute("aria-busy", if loading { "true" } else { "false" });
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = loading;
        }
    }

    fn clear(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Ok(list) = dom::html_element_by_id(&self.list_id) {
                list.set_inner_html("");
            }
        }
    }

    fn append(&self, entry: &Entry) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Err(err) = self.append_row(entry) {
                web_sys::console::warn_1(&err.into());
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = entry;
        }
    }
}

impl FocusSurface for DomListSurface {
    fn row_count(&self) -> usize {
        #[cfg(target_arch = "wasm32")]
        {
            self.rows().len()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            0
        }
    }

    fn focused_row(&self) -> Option<usize> {
        #[cfg(target_arch = "wasm32")]
        {
            let active: web_sys::Node = dom::document().ok()?.active_element()?.into();
            self.rows()
                .iter()
                .position(|row| row.contains(Some(&active)))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn focus_row(&self, index: usize) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(row) = self.rows().get(index) {
                let _ = row.focus();
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = index;
        }
    }
}
