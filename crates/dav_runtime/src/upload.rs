//! Upload conflict resolution and directory creation.

use std::rc::Rc;

use dav_host::{join_path, BrowserHistory, ConfirmService, Entry, UploadFile};
use leptos::logging::{log, warn};

use crate::{DavEvent, EventBus, EventKind, ListSyncController, RemoteStore};

#[derive(Debug, Clone)]
/// One upload transaction, alive from the conflict check until the remote call settles.
pub struct PendingUpload {
    /// Target collection path.
    pub path: String,
    /// File being stored.
    pub file: UploadFile,
    /// Existing entry with the same name, if any.
    pub conflicts_with: Option<Entry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How an upload transaction ended.
pub enum UploadOutcome {
    /// The remote store accepted the file.
    Uploaded,
    /// The user kept the existing file.
    Declined,
    /// The remote store rejected the file.
    Failed,
}

/// Text of the overwrite prompt for an existing entry named `name`.
pub fn overwrite_prompt(name: &str) -> String {
    format!("A file called '{name}' already exists, would you like to overwrite it?")
}

#[derive(Clone)]
/// Handles [`DavEvent::Upload`] and [`DavEvent::CreateDirectory`].
pub struct UploadController {
    bus: EventBus,
    list: ListSyncController,
    remote: RemoteStore,
    history: Rc<dyn BrowserHistory>,
    confirm: Rc<dyn ConfirmService>,
}

impl UploadController {
    /// Creates a controller checking conflicts through `list`.
    pub fn new(
        bus: EventBus,
        list: ListSyncController,
        remote: RemoteStore,
        history: Rc<dyn BrowserHistory>,
        confirm: Rc<dyn ConfirmService>,
    ) -> Self {
        Self {
            bus,
            list,
            remote,
            history,
            confirm,
        }
    }

    /// Uploads `file` into `path`, asking before overwriting an existing entry.
    ///
    /// The listing used for the conflict check is always fetched fresh. While the overwrite
    /// prompt is open the bus is held, so events triggered meanwhile are queued and dispatched
    /// once the user has decided.
    pub async fn upload(&self, path: String, file: UploadFile) -> UploadOutcome {
        let listing = self.list.fetch(&path, true).await;
        if listing.is_none() {
            warn!("no listing for {path}; uploading {} without a conflict check", file.name());
        }

        let pending = PendingUpload {
            conflicts_with: listing.and_then(|collection| collection.find(file.name()).cloned()),
            path,
            file,
        };

        if let Some(existing) = &pending.conflicts_with {
            let hold = self.bus.hold();
            let accepted = self.confirm.confirm(&overwrite_prompt(existing.name())).await;
            drop(hold);

            if !accepted {
                log!("kept existing {}", existing.name());
                return UploadOutcome::Declined;
            }
        }

        if self.remote.upload(&pending.path, &pending.file).await {
            UploadOutcome::Uploaded
        } else {
            UploadOutcome::Failed
        }
    }

    /// Submits every file as its own [`DavEvent::Upload`] against the current browser path.
    ///
    /// Each file gets an independent conflict check and overwrite decision.
    pub fn submit_files(&self, files: impl IntoIterator<Item = UploadFile>) {
        let path = self.history.current_path();
        for file in files {
            self.bus.trigger(DavEvent::Upload {
                path: path.clone(),
                file,
            });
        }
    }

    /// Creates the directory `name` inside the current browser path.
    ///
    /// Returns `false` without a remote call when `name` is blank.
    pub async fn create_directory(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let path = format!("{}/", join_path(&self.history.current_path(), name));
        self.remote.mkcol(&path).await
    }

    /// Subscribes to [`DavEvent::Upload`] and [`DavEvent::CreateDirectory`].
    pub fn attach(&self) {
        let this = self.clone();
        self.bus.on_async(EventKind::Upload, move |event| {
            let request = match event {
                DavEvent::Upload { path, file } => Some((path.clone(), file.clone())),
                _ => None,
            };
            let this = this.clone();
            async move {
                if let Some((path, file)) = request {
                    this.upload(path, file).await;
                }
                Ok(())
            }
        });

        let this = self.clone();
        self.bus.on_async(EventKind::CreateDirectory, move |event| {
            let name = match event {
                DavEvent::CreateDirectory { name } => Some(name.clone()),
                _ => None,
            };
            let this = this.clone();
            async move {
                if let Some(name) = name {
                    this.create_directory(&name).await;
                }
                Ok(())
            }
        });
    }
}
