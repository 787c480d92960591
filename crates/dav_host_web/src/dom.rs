//! Shared DOM lookups.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
pub(crate) fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn document() -> Result<web_sys::Document, String> {
    window()?
        .document()
        .ok_or_else(|| "document unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn html_element_by_id(id: &str) -> Result<web_sys::HtmlElement, String> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| format!("no element with id `{id}`"))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| format!("element `{id}` is not an HTML element"))
}

/// Maps a browser exception into the crate's string error shape.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(context: &str, err: wasm_bindgen::JsValue) -> String {
    format!("{context}: {err:?}")
}
