use std::rc::Rc;

use dav_host::{DavClient, HostServices, MemoryDavClient, SessionConfig};
use dav_host_web::{
    apply_capability_classes, listen_history_changes, probe_capabilities, wire_create_directory,
    wire_drop, wire_file_input, wire_keydown, DomListSurface, WasmSpawner, WebConfirmService,
    WebHistory, WebToastService,
};
use dav_runtime::{DavEvent, DavSession, EventBus};
use leptos::{logging, *};

const ROOT_ID: &str = "dav-root";
const LIST_ID: &str = "dav-list";
const UPLOAD_INPUT_ID: &str = "dav-upload";
const CREATE_DIRECTORY_ID: &str = "dav-create-directory";
const TOASTS_ID: &str = "toasts";

/// Static panel markup the session wires itself onto.
#[component]
pub fn DavBrowser() -> impl IntoView {
    view! {
        <main id=ROOT_ID class="dav-root">
            <ul id=LIST_ID class="dav-list" role="list" aria-busy="true"></ul>
            <footer class="dav-footer">
                <label class="dav-upload">
                    "Upload files"
                    <input id=UPLOAD_INPUT_ID type="file" multiple=true />
                </label>
                <a id=CREATE_DIRECTORY_ID href="#" class="dav-create-directory">
                    "Create directory"
                </a>
            </footer>
            <div id=TOASTS_ID class="toasts" aria-live="polite"></div>
        </main>
    }
}

/// Parses the `data-config` attribute, falling back to defaults on absence or bad JSON.
pub fn parse_config(raw: Option<&str>) -> SessionConfig {
    match SessionConfig::from_json(raw.unwrap_or_default()) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("ignoring invalid data-config: {err}");
            SessionConfig::default()
        }
    }
}

/// Fills an unset `origin` with the page's own origin so absolute URLs on it resolve to paths.
pub fn resolve_origin(mut config: SessionConfig, page_origin: Option<String>) -> SessionConfig {
    if config.origin.is_empty() {
        if let Some(origin) = page_origin {
            config.origin = origin;
        }
    }
    config
}

fn read_config() -> SessionConfig {
    let window = web_sys::window();
    let raw = window
        .as_ref()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .and_then(|body| body.get_attribute("data-config"));
    let page_origin = window.and_then(|window| window.location().origin().ok());
    resolve_origin(parse_config(raw.as_deref()), page_origin)
}

/// In-memory store the page browses until a network client is injected.
pub fn demo_client() -> MemoryDavClient {
    MemoryDavClient::default()
        .with_file("/README.txt", "Drop files onto the listing to upload them.")
        .with_file("/documents/notes.txt", "")
        .with_directory("/photos")
}

/// Builds the session over `client`, wires the page, and loads the current path.
///
/// # Errors
///
/// Returns an error when the panel markup is missing or a listener cannot be installed.
pub fn start_session(client: Rc<dyn DavClient>) -> Result<DavSession, String> {
    let capabilities = probe_capabilities();
    apply_capability_classes(ROOT_ID, capabilities)?;

    let services = HostServices {
        client,
        history: Rc::new(WebHistory),
        confirm: Rc::new(WebConfirmService),
        toasts: Rc::new(WebToastService::new(TOASTS_ID)),
        capabilities,
        config: read_config(),
    };
    let surface = Rc::new(DomListSurface::new(LIST_ID));
    let bus = EventBus::new(Rc::new(WasmSpawner));
    let session = DavSession::new(services, bus, surface.clone(), surface);

    let navigation = session.navigation().clone();
    listen_history_changes(move || navigation.on_history_change())?;

    if session.capabilities().drag_drop {
        let upload = session.upload().clone();
        wire_drop(ROOT_ID, move |files| upload.submit_files(files))?;
    }

    let upload = session.upload().clone();
    wire_file_input(UPLOAD_INPUT_ID, move |files| upload.submit_files(files))?;

    let bus = session.bus().clone();
    wire_create_directory(CREATE_DIRECTORY_ID, "Directory name", move |name| {
        bus.trigger(DavEvent::CreateDirectory { name })
    })?;

    let keyboard = session.keyboard().clone();
    wire_keydown(Some(LIST_ID), move |key| keyboard.handle_key(key))?;
    let keyboard = session.keyboard().clone();
    wire_keydown(None, move |key| keyboard.handle_key(key))?;

    logging::log!("file manager session started");
    session.start();
    Ok(session)
}
