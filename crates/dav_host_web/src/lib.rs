//! Browser (`wasm32`) implementations of the [`dav_host`] contracts.
//!
//! Every adapter compiles on non-wasm targets too, where it degrades to an inert fallback:
//! history reports `/`, prompts decline, toasts and surfaces render nothing, and event wiring
//! is skipped. DOM event wiring takes plain callbacks so this crate never depends on the
//! runtime that consumes it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod capabilities;
mod dom;
pub mod history;
pub mod notifications;
pub mod prompt;
pub mod spawner;
pub mod surface;
pub mod wiring;

pub use capabilities::{apply_capability_classes, probe_capabilities};
pub use history::{listen_history_changes, WebHistory};
pub use notifications::WebToastService;
pub use prompt::{prompt_text, WebConfirmService};
pub use spawner::WasmSpawner;
pub use surface::DomListSurface;
pub use wiring::{
    drop_highlight, wire_create_directory, wire_drop, wire_file_input, wire_keydown,
    DROP_ACTIVE_CLASS,
};
