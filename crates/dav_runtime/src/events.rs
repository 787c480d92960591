//! Typed messages exchanged over the session [`crate::EventBus`].

use std::{fmt, rc::Rc};

use dav_host::{Collection, DavResponse, Entry, EntrySpec, RequestFailure, UploadFile};

/// Shared callback carried inside an event payload.
pub struct Callback<A>(Rc<dyn Fn(A)>);

impl<A> Callback<A> {
    /// Wraps a closure.
    pub fn new(f: impl Fn(A) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the callback.
    pub fn call(&self, arg: A) {
        (self.0)(arg)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

#[derive(Debug, Clone, Default)]
/// Navigation request carried by [`DavEvent::Go`].
pub struct GoRequest {
    /// Target path; `None` means the path the browser currently reports.
    pub path: Option<String>,
    /// Skip cached listings.
    pub bypass_cache: bool,
    /// Invoked when no listing could be fetched.
    pub on_failure: Option<Callback<()>>,
}

impl GoRequest {
    /// Navigates to `path`.
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Forces a fresh listing.
    pub fn bypassing_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }

    /// Registers a failure callback.
    pub fn on_failure(mut self, f: impl Fn() + 'static) -> Self {
        self.on_failure = Some(Callback::new(move |()| f()));
        self
    }
}

#[derive(Debug, Clone)]
/// Every message the session bus carries.
pub enum DavEvent {
    /// Navigate (or refresh) the listing.
    Go(GoRequest),
    /// A listing fetch for `path` started.
    ListUpdateRequest {
        /// Requested path.
        path: String,
    },
    /// A listing fetch produced `collection`.
    ListUpdateSuccess {
        /// Fetched listing.
        collection: Rc<Collection>,
    },
    /// A listing fetch produced nothing.
    ListUpdateFailed,
    /// `collection` replaces the in-memory copy of the listing at its path.
    CollectionUpdate {
        /// Replacement listing.
        collection: Rc<Collection>,
    },
    /// `entry` changed inside its collection.
    EntryUpdate {
        /// Entry as currently listed; its back-reference names the affected collection.
        entry: Entry,
        /// New description, when the entry itself was modified.
        replacement: Option<EntrySpec>,
    },
    /// Upload `file` into the collection at `path`.
    Upload {
        /// Target collection path.
        path: String,
        /// File to store.
        file: UploadFile,
    },
    /// The remote store accepted an upload.
    UploadSuccess {
        /// Target collection path.
        path: String,
        /// Uploaded file.
        file: UploadFile,
    },
    /// Move or rename a resource.
    Move {
        /// Current resource path.
        source: String,
        /// New resource path or URL.
        destination: String,
    },
    /// The remote store moved a resource.
    MoveSuccess {
        /// Previous resource path.
        source: String,
        /// New resource path or URL.
        destination: String,
    },
    /// Delete a resource.
    Delete {
        /// Resource path.
        path: String,
    },
    /// The remote store deleted a resource.
    DeleteSuccess {
        /// Deleted resource path.
        path: String,
    },
    /// Fetch a resource's text.
    Get {
        /// Resource path.
        path: String,
        /// Receives the decoded text, or `None` when nothing was fetched.
        reply: Callback<Option<String>>,
    },
    /// Probe a URI.
    Check {
        /// URI to probe.
        uri: String,
        /// Receives the response when it is ok.
        on_ok: Option<Callback<DavResponse>>,
        /// Invoked when the probe fails or is not ok.
        on_failure: Option<Callback<()>>,
    },
    /// Create a directory named `name` inside the current path.
    CreateDirectory {
        /// Directory name as typed by the user.
        name: String,
    },
    /// The remote store created a collection.
    MkcolSuccess {
        /// Created collection path.
        path: String,
    },
    /// A request reached the server and failed.
    Error(RequestFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Registration key for [`DavEvent`] handlers.
#[allow(missing_docs)]
pub enum EventKind {
    Go,
    ListUpdateRequest,
    ListUpdateSuccess,
    ListUpdateFailed,
    CollectionUpdate,
    EntryUpdate,
    Upload,
    UploadSuccess,
    Move,
    MoveSuccess,
    Delete,
    DeleteSuccess,
    Get,
    Check,
    CreateDirectory,
    MkcolSuccess,
    Error,
}

impl DavEvent {
    /// Registration key of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Go(_) => EventKind::Go,
            Self::ListUpdateRequest { .. } => EventKind::ListUpdateRequest,
            Self::ListUpdateSuccess { .. } => EventKind::ListUpdateSuccess,
            Self::ListUpdateFailed => EventKind::ListUpdateFailed,
            Self::CollectionUpdate { .. } => EventKind::CollectionUpdate,
            Self::EntryUpdate { .. } => EventKind::EntryUpdate,
            Self::Upload { .. } => EventKind::Upload,
            Self::UploadSuccess { .. } => EventKind::UploadSuccess,
            Self::Move { .. } => EventKind::Move,
            Self::MoveSuccess { .. } => EventKind::MoveSuccess,
            Self::Delete { .. } => EventKind::Delete,
            Self::DeleteSuccess { .. } => EventKind::DeleteSuccess,
            Self::Get { .. } => EventKind::Get,
            Self::Check { .. } => EventKind::Check,
            Self::CreateDirectory { .. } => EventKind::CreateDirectory,
            Self::MkcolSuccess { .. } => EventKind::MkcolSuccess,
            Self::Error(_) => EventKind::Error,
        }
    }
}

impl EventKind {
    /// Stable wire-style name used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::ListUpdateRequest => "list:update:request",
            Self::ListUpdateSuccess => "list:update:success",
            Self::ListUpdateFailed => "list:update:failed",
            Self::CollectionUpdate => "collection:update",
            Self::EntryUpdate => "entry:update",
            Self::Upload => "upload",
            Self::UploadSuccess => "upload:success",
            Self::Move => "move",
            Self::MoveSuccess => "move:success",
            Self::Delete => "delete",
            Self::DeleteSuccess => "delete:success",
            Self::Get => "get",
            Self::Check => "check",
            Self::CreateDirectory => "create-directory",
            Self::MkcolSuccess => "mkcol:success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
