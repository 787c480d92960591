//! Browser history adapter and back/forward subscription.

use dav_host::BrowserHistory;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
use crate::dom;

#[derive(Debug, Clone, Copy, Default)]
/// History adapter backed by `window.location`, `window.history` and `document.title`.
pub struct WebHistory;

impl BrowserHistory for WebHistory {
    fn current_path(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            dom::window()
                .and_then(|window| {
                    window
                        .location()
                        .pathname()
                        .map_err(|err| dom::js_error("read location", err))
                })
                .unwrap_or_else(|_| "/".to_string())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            "/".to_string()
        }
    }

    fn push_path(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let pushed = dom::window().and_then(|window| {
                window
                    .history()
                    .and_then(|history| {
                        history.push_state_with_url(&JsValue::NULL, "", Some(path))
                    })
                    .map_err(|err| dom::js_error("push history", err))
            });
            if let Err(err) = pushed {
                web_sys::console::warn_1(&err.into());
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = path;
        }
    }

    fn set_title(&self, title: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Ok(document) = dom::document() {
                document.set_title(title);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = title;
        }
    }
}

/// Calls `on_change` whenever the user navigates with back/forward.
///
/// # Errors
///
/// Returns an error when the `popstate` listener cannot be installed.
pub fn listen_history_changes(on_change: impl Fn() + 'static) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = dom::window()?;
        let listener = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| on_change()));
        window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .map_err(|err| dom::js_error("listen popstate", err))?;
        listener.forget();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = on_change;
        Ok(())
    }
}
