//! Host capability descriptor and service bundle injected into the runtime.

use std::rc::Rc;

use crate::{BrowserHistory, ConfirmService, DavClient, SessionConfig, ToastService};

/// Browser capability snapshot computed once at startup.
///
/// Wiring code branches on this descriptor instead of probing the DOM, so navigation and upload
/// logic can run without a real rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Touch input is available.
    pub touch: bool,
    /// Drag-and-drop events (`dragstart` and `drop`) are available.
    pub drag_drop: bool,
}

impl Capabilities {
    /// Desktop-browser posture: drag-drop, no touch.
    pub const fn desktop() -> Self {
        Self {
            touch: false,
            drag_drop: true,
        }
    }

    /// CSS classes the mount element should carry for this posture.
    pub fn container_classes(self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.touch {
            classes.push("is-touch");
        }
        if !self.drag_drop {
            classes.push("no-drag-drop");
        }
        classes
    }
}

/// Service bundle injected into one browsing session.
///
/// All environment-specific selection happens before this bundle crosses into `dav_runtime`.
#[derive(Clone)]
pub struct HostServices {
    /// Remote resource client.
    pub client: Rc<dyn DavClient>,
    /// Browser history and document chrome.
    pub history: Rc<dyn BrowserHistory>,
    /// Overwrite confirmation prompt.
    pub confirm: Rc<dyn ConfirmService>,
    /// Toast renderer.
    pub toasts: Rc<dyn ToastService>,
    /// Capability snapshot.
    pub capabilities: Capabilities,
    /// Session settings.
    pub config: SessionConfig,
}
