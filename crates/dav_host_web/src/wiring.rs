//! DOM event wiring: drop targets, file pickers, the create-directory trigger and keyboard
//! handling. Each installer hands plain Rust values to its callback.

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use dav_host::UploadFile;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::{dom, prompt_text};

#[cfg(target_arch = "wasm32")]
fn upload_files(files: Option<web_sys::FileList>) -> Vec<UploadFile> {
    let Some(files) = files else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|index| files.get(index))
        .map(|file| {
            UploadFile::new(
                file.name(),
                file.type_(),
                file.size() as u64,
                Rc::new(file),
            )
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), String> {
    let listener = Closure::<dyn FnMut(E)>::wrap(Box::new(handler));
    target
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .map_err(|err| dom::js_error(&format!("listen {event}"), err))?;
    listener.forget();
    Ok(())
}

/// Class carried by a drop target while files are dragged over it.
pub const DROP_ACTIVE_CLASS: &str = "active";

#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

/// Whether a drag event of type `event_type` leaves the drop target highlighted.
pub fn drop_highlight(event_type: &str) -> Option<bool> {
    match event_type {
        "dragenter" | "dragover" => Some(true),
        "dragleave" | "drop" => Some(false),
        _ => None,
    }
}

/// Makes the element with id `target_id` accept dropped files.
///
/// Every drag event on the target has its default suppressed, so the browser never opens a
/// dropped file. The target carries [`DROP_ACTIVE_CLASS`] while files hover over it. Each drop
/// hands all dropped files to `on_files` at once.
///
/// # Errors
///
/// Returns an error when the element is missing or a listener cannot be installed.
pub fn wire_drop(
    target_id: &str,
    on_files: impl Fn(Vec<UploadFile>) + 'static,
) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let target = dom::html_element_by_id(target_id)?;
        let on_files = Rc::new(on_files);
        for event_type in DRAG_EVENTS {
            let highlighted = target.clone();
            let on_files = on_files.clone();
            listen(&target, event_type, move |event: web_sys::DragEvent| {
                event.prevent_default();
                event.stop_propagation();
                if let Some(active) = drop_highlight(&event.type_()) {
                    let _ = highlighted
                        .class_list()
                        .toggle_with_force(DROP_ACTIVE_CLASS, active);
                }
                if event.type_() != "drop" {
                    return;
                }
                let files = event.data_transfer().and_then(|transfer| transfer.files());
                let files = upload_files(files);
                if !files.is_empty() {
                    (*on_files)(files);
                }
            })?;
        }
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (target_id, on_files);
        Ok(())
    }
}

/// Hands every file picked through the `<input type="file">` with id `input_id` to `on_files`,
/// then resets the input so the same file can be picked again.
///
/// # Errors
///
/// Returns an error when the input is missing or a listener cannot be installed.
pub fn wire_file_input(
    input_id: &str,
    on_files: impl Fn(Vec<UploadFile>) + 'static,
) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let input = dom::html_element_by_id(input_id)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .map_err(|_| format!("element `{input_id}` is not an input"))?;
        let picker = input.clone();
        listen(&input, "change", move |_: web_sys::Event| {
            let files = upload_files(picker.files());
            picker.set_value("");
            if !files.is_empty() {
                on_files(files);
            }
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (input_id, on_files);
        Ok(())
    }
}

/// Prompts with `message` when the element with id `trigger_id` is clicked and hands the answer
/// to `on_name`. Cancelled prompts are dropped.
///
/// # Errors
///
/// Returns an error when the trigger is missing or a listener cannot be installed.
pub fn wire_create_directory(
    trigger_id: &str,
    message: &str,
    on_name: impl Fn(String) + 'static,
) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let trigger = dom::html_element_by_id(trigger_id)?;
        let message = message.to_string();
        listen(&trigger, "click", move |event: web_sys::Event| {
            event.prevent_default();
            if let Some(name) = prompt_text(&message) {
                on_name(name);
            }
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (trigger_id, message, on_name);
        Ok(())
    }
}

/// Routes `keydown` on the element with id `target_id` (or the whole document when `None`) to
/// `on_key`. Keys it reports as consumed have their default action and propagation stopped.
///
/// # Errors
///
/// Returns an error when the target is missing or a listener cannot be installed.
pub fn wire_keydown(
    target_id: Option<&str>,
    on_key: impl Fn(&str) -> bool + 'static,
) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let target: web_sys::EventTarget = match target_id {
            Some(id) => dom::html_element_by_id(id)?.into(),
            None => dom::document()?.into(),
        };
        listen(&target, "keydown", move |event: web_sys::KeyboardEvent| {
            if on_key(&event.key()) {
                event.prevent_default();
                event.stop_propagation();
            }
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (target_id, on_key);
        Ok(())
    }
}
