//! `window.confirm` / `window.prompt` adapters.

use dav_host::{ConfirmFuture, ConfirmService};

#[cfg(target_arch = "wasm32")]
use crate::dom;

#[derive(Debug, Clone, Copy, Default)]
/// Confirmation adapter backed by the blocking `window.confirm` dialog.
pub struct WebConfirmService;

impl ConfirmService for WebConfirmService {
    fn confirm<'a>(&'a self, message: &'a str) -> ConfirmFuture<'a, bool> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                dom::window()
                    .and_then(|window| {
                        window
                            .confirm_with_message(message)
                            .map_err(|err| dom::js_error("confirm", err))
                    })
                    .unwrap_or(false)
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = message;
                false
            }
        })
    }
}

/// Asks the user for a line of text; `None` when cancelled or unavailable.
pub fn prompt_text(message: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        dom::window()
            .ok()?
            .prompt_with_message(message)
            .ok()
            .flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        None
    }
}
