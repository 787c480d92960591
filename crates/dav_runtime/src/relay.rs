//! Thin relays to the remote store for move/delete/get/check, and the toasts confirming
//! completed remote operations.

use std::rc::Rc;

use dav_host::{
    last_segment, split_resource, strip_origin, RequestFailure, SessionConfig, Toast,
    ToastService,
};
use leptos::logging::warn;

use crate::{DavEvent, EventBus, EventKind, RemoteStore};

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a completed move is described to the user.
pub enum MoveOutcome {
    /// Same parent directory, new name.
    Renamed {
        /// Previous file segment.
        from: String,
        /// New file segment.
        to: String,
    },
    /// Different parent directory.
    Moved {
        /// Moved file segment.
        file: String,
        /// Destination parent directory.
        directory: String,
    },
}

impl MoveOutcome {
    /// Classifies a move by comparing parent paths; `None` when either side has no `/`.
    pub fn classify(source: &str, destination: &str, origin: &str) -> Option<Self> {
        let (source_parent, source_file) = split_resource(strip_origin(source, origin))?;
        let (destination_parent, destination_file) =
            split_resource(strip_origin(destination, origin))?;

        Some(if source_parent == destination_parent {
            Self::Renamed {
                from: source_file.to_string(),
                to: destination_file.to_string(),
            }
        } else {
            Self::Moved {
                file: source_file.to_string(),
                directory: destination_parent.to_string(),
            }
        })
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Renamed { from, to } => format!("'{from}' successfully renamed to '{to}'."),
            Self::Moved { file, directory } => {
                format!("'{file}' successfully moved to '{directory}'.")
            }
        }
    }
}

/// Message for a completed upload.
pub fn upload_message(file_name: &str) -> String {
    format!("'{file_name}' has been successfully uploaded.")
}

/// Message for a completed delete.
pub fn delete_message(path: &str) -> String {
    format!("'{}' has been deleted.", last_segment(path))
}

/// Message for a created directory.
pub fn mkcol_message(path: &str) -> String {
    format!("'{}' has been created.", last_segment(path))
}

/// Message for a failed request.
pub fn error_message(failure: &RequestFailure) -> String {
    failure.to_string()
}

#[derive(Clone)]
/// Relays resource operations to the remote store and renders their outcomes as toasts.
pub struct ResourceRelay {
    bus: EventBus,
    remote: RemoteStore,
    toasts: Rc<dyn ToastService>,
    config: Rc<SessionConfig>,
}

impl ResourceRelay {
    /// Creates a relay.
    pub fn new(
        bus: EventBus,
        remote: RemoteStore,
        toasts: Rc<dyn ToastService>,
        config: Rc<SessionConfig>,
    ) -> Self {
        Self {
            bus,
            remote,
            toasts,
            config,
        }
    }

    /// Toast for an event that reports an outcome, `None` for every other event.
    pub fn toast_for(&self, event: &DavEvent) -> Option<Toast> {
        let hide = self.config.toast_hide_secs;
        match event {
            DavEvent::UploadSuccess { file, .. } => {
                Some(Toast::success(upload_message(file.name()), hide))
            }
            DavEvent::MoveSuccess {
                source,
                destination,
            } => MoveOutcome::classify(source, destination, &self.config.origin)
                .map(|outcome| Toast::success(outcome.message(), hide)),
            DavEvent::DeleteSuccess { path } => Some(Toast::success(delete_message(path), hide)),
            DavEvent::MkcolSuccess { path } => Some(Toast::success(mkcol_message(path), hide)),
            DavEvent::Error(failure) => Some(Toast::error(error_message(failure))),
            _ => None,
        }
    }

    /// Subscribes the relays and the outcome toasts.
    pub fn attach(&self) {
        let remote = self.remote.clone();
        self.bus.on_async(EventKind::Move, move |event| {
            let request = match event {
                DavEvent::Move {
                    source,
                    destination,
                } => Some((source.clone(), destination.clone())),
                _ => None,
            };
            let remote = remote.clone();
            async move {
                if let Some((source, destination)) = request {
                    remote.move_resource(&source, &destination).await;
                }
                Ok(())
            }
        });

        let remote = self.remote.clone();
        self.bus.on_async(EventKind::Delete, move |event| {
            let path = match event {
                DavEvent::Delete { path } => Some(path.clone()),
                _ => None,
            };
            let remote = remote.clone();
            async move {
                if let Some(path) = path {
                    remote.delete(&path).await;
                }
                Ok(())
            }
        });

        let remote = self.remote.clone();
        self.bus.on_async(EventKind::Get, move |event| {
            let request = match event {
                DavEvent::Get { path, reply } => Some((path.clone(), reply.clone())),
                _ => None,
            };
            let remote = remote.clone();
            async move {
                if let Some((path, reply)) = request {
                    let text = remote.get(&path).await.map(|response| response.text());
                    reply.call(text);
                }
                Ok(())
            }
        });

        let remote = self.remote.clone();
        self.bus.on_async(EventKind::Check, move |event| {
            let request = match event {
                DavEvent::Check {
                    uri,
                    on_ok,
                    on_failure,
                } => Some((uri.clone(), on_ok.clone(), on_failure.clone())),
                _ => None,
            };
            let remote = remote.clone();
            async move {
                let Some((uri, on_ok, on_failure)) = request else {
                    return Ok(());
                };
                match (remote.check(&uri).await, on_ok) {
                    (Some(response), Some(on_ok)) if response.is_ok() => on_ok.call(response),
                    (Some(response), None) if response.is_ok() => {}
                    _ => {
                        if let Some(on_failure) = on_failure {
                            on_failure.call(());
                        }
                    }
                }
                Ok(())
            }
        });

        for kind in [
            EventKind::UploadSuccess,
            EventKind::MoveSuccess,
            EventKind::DeleteSuccess,
            EventKind::MkcolSuccess,
            EventKind::Error,
        ] {
            let this = self.clone();
            self.bus.on_async(kind, move |event| {
                let toast = this.toast_for(event);
                if toast.is_none() {
                    warn!("no notification for {}", event.kind());
                }
                let toasts = this.toasts.clone();
                async move {
                    match toast {
                        Some(toast) => toasts.show(toast).await,
                        None => Ok(()),
                    }
                }
            });
        }
    }
}
