//! Typed host contracts and shared models for the WebDAV file manager.
//!
//! This crate is the API-first boundary between the synchronization runtime (`dav_runtime`) and
//! the environment it runs in. It exposes the listing models, the remote-store client contract,
//! browser-boundary contracts (history, confirmation, toasts, rendering surfaces) and the session
//! configuration, while concrete browser adapters live in `dav_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod config;
pub mod history;
pub mod host;
pub mod notifications;
pub mod path;
pub mod prompt;
pub mod surface;
pub mod types;

pub use client::{DavClient, DavFuture, MemoryDavClient, NoopDavClient};
pub use config::{SessionConfig, DEFAULT_TITLE_SUFFIX, DEFAULT_TOAST_HIDE_SECS};
pub use history::{BrowserHistory, MemoryHistory};
pub use host::{Capabilities, HostServices};
pub use notifications::{
    MemoryToastService, NoopToastService, Toast, ToastFuture, ToastKind, ToastService,
};
pub use path::{
    decode_path, join_path, last_segment, normalize_path, parent_path, split_resource,
    strip_origin,
};
pub use prompt::{ConfirmFuture, ConfirmService, FixedConfirmService};
pub use surface::{FocusSurface, ListSurface, NoopListSurface};
pub use types::{
    Collection, DavError, DavResponse, Entry, EntrySpec, RequestFailure, UploadFile,
};
