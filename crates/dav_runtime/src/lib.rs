//! Event-driven synchronization core of the WebDAV file manager.
//!
//! A per-session [`EventBus`] carries typed [`DavEvent`]s between the controllers:
//! [`NavigationController`] turns `go` requests into listing fetches, [`ListSyncController`]
//! owns the listing cache and the rendered collection, [`UploadController`] resolves overwrite
//! conflicts, [`ResourceRelay`] forwards move/delete/get/check and renders outcomes, and
//! [`KeyboardNavigator`] moves row focus. Host specifics arrive through `dav_host` contracts.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod bus;
mod events;
mod keyboard;
mod list_sync;
mod navigation;
mod relay;
mod remote;
mod session;
mod upload;

pub use bus::{DispatchHold, EventBus};
pub use dav_host::{FocusSurface, ListSurface, NoopListSurface};
pub use events::{Callback, DavEvent, EventKind, GoRequest};
pub use keyboard::{next_focus, KeyboardNavigator, NavKey};
pub use list_sync::{ListSyncController, ListingState};
pub use navigation::{NavigationController, NavigationState};
pub use relay::{
    delete_message, error_message, mkcol_message, upload_message, MoveOutcome, ResourceRelay,
};
pub use remote::RemoteStore;
pub use session::DavSession;
pub use upload::{overwrite_prompt, PendingUpload, UploadController, UploadOutcome};
