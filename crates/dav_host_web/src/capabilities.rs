//! One-shot browser capability probing.

use dav_host::Capabilities;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use crate::dom;

/// Probes touch and drag-and-drop support once.
///
/// Drag-and-drop counts as supported when a fresh `div` exposes both the `ondragstart` and
/// `ondrop` handler properties. Non-wasm targets report the desktop posture.
pub fn probe_capabilities() -> Capabilities {
    #[cfg(target_arch = "wasm32")]
    {
        let Ok(window) = dom::window() else {
            return Capabilities::default();
        };
        let touch = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))
            .unwrap_or(false);
        let drag_drop = dom::document()
            .and_then(|document| {
                document
                    .create_element("div")
                    .map_err(|err| dom::js_error("create probe", err))
            })
            .map(|probe| supports_event(&probe, "dragstart") && supports_event(&probe, "drop"))
            .unwrap_or(false);
        Capabilities { touch, drag_drop }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Capabilities::desktop()
    }
}

#[cfg(target_arch = "wasm32")]
fn supports_event(element: &web_sys::Element, event: &str) -> bool {
    js_sys::Reflect::get(element, &JsValue::from_str(&format!("on{event}")))
        .map(|handler| !handler.is_undefined())
        .unwrap_or(false)
}

/// Adds the capability classes to the element with id `root_id`.
///
/// # Errors
///
/// Returns an error when the element is missing or a class cannot be added.
pub fn apply_capability_classes(root_id: &str, capabilities: Capabilities) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let root = dom::html_element_by_id(root_id)?;
        for class in capabilities.container_classes() {
            root.class_list()
                .add_1(class)
                .map_err(|err| dom::js_error("add capability class", err))?;
        }
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (root_id, capabilities);
        Ok(())
    }
}
