//! Toast rendering into a DOM container.

use dav_host::{Toast, ToastFuture, ToastKind, ToastService};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::dom;

/// CSS class list for a toast of `kind`.
pub fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Error => "toast toast--error",
        ToastKind::Success => "toast toast--success",
    }
}

#[derive(Debug, Clone)]
/// Toast adapter appending dismissable messages to the element with id `container_id`.
///
/// Success toasts remove themselves after their hide delay; error toasts stay until the user
/// clicks their dismiss button.
pub struct WebToastService {
    container_id: String,
}

impl WebToastService {
    /// Renders into the element with id `container_id`.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    /// Id of the container element.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    #[cfg(target_arch = "wasm32")]
    fn render(&self, toast: &Toast) -> Result<(), String> {
        let window = dom::window()?;
        let document = dom::document()?;
        let container = dom::html_element_by_id(&self.container_id)?;

        let element = document
            .create_element("div")
            .map_err(|err| dom::js_error("create toast", err))?;
        element.set_class_name(toast_class(toast.kind));
        let role = match toast.kind {
            ToastKind::Error => "alert",
            ToastKind::Success => "status",
        };
        element
            .set_attribute("role", role)
            .map_err(|err| dom::js_error("toast role", err))?;

        let content = document
            .create_element("span")
            .map_err(|err| dom::js_error("create toast content", err))?;
        content.set_text_content(Some(&toast.content));
        element
            .append_child(&content)
            .map_err(|err| dom::js_error("append toast content", err))?;

        let dismiss = document
            .create_element("button")
            .map_err(|err| dom::js_error("create dismiss button", err))?;
        dismiss.set_class_name("toast__dismiss");
        dismiss.set_text_content(Some("\u{00d7}"));
        let _ = dismiss.set_attribute("aria-label", "Dismiss");
        let target = element.clone();
        let on_dismiss = Closure::once_into_js(move || target.remove());
        dismiss
            .add_event_listener_with_callback("click", on_dismiss.unchecked_ref())
            .map_err(|err| dom::js_error("listen dismiss", err))?;
        element
            .append_child(&dismiss)
            .map_err(|err| dom::js_error("append dismiss button", err))?;

        container
            .append_child(&element)
            .map_err(|err| dom::js_error("append toast", err))?;

        if let Some(secs) = toast.hide_after_secs {
            let target = element.clone();
            let on_timeout = Closure::once_into_js(move || target.remove());
            let delay_ms = i32::try_from(u64::from(secs) * 1_000).unwrap_or(i32::MAX);
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    on_timeout.unchecked_ref(),
                    delay_ms,
                )
                .map_err(|err| dom::js_error("schedule toast hide", err))?;
        }
        Ok(())
    }
}

impl Default for WebToastService {
    fn default() -> Self {
        Self::new("toasts")
    }
}

impl ToastService for WebToastService {
    fn show<'a>(&'a self, toast: Toast) -> ToastFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                self.render(&toast)
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = toast;
                Ok(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn toast_classes_follow_kind() {
        assert_eq!(toast_class(ToastKind::Error), "toast toast--error");
        assert_eq!(toast_class(ToastKind::Success), "toast toast--success");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_toasts_are_accepted() {
        let service = WebToastService::default();
        assert_eq!(service.container_id(), "toasts");
        assert_eq!(block_on(service.show(Toast::error("boom"))), Ok(()));
    }
}
