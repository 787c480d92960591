mod web_app;

pub use web_app::{demo_client, parse_config, start_session, DavBrowser};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <DavBrowser /> });
    if let Err(err) = start_session(std::rc::Rc::new(demo_client())) {
        leptos::logging::warn!("file manager failed to start: {err}");
    }
}
