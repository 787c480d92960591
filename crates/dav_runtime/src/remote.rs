//! Remote-store facade that turns client results into bus events.

use std::rc::Rc;

use dav_host::{Collection, DavClient, DavError, DavResponse, UploadFile};
use leptos::logging::warn;

use crate::{DavEvent, EventBus};

#[derive(Clone)]
/// Wraps a [`DavClient`] so every completed mutation raises its `*Success` event and every
/// transport failure raises [`DavEvent::Error`].
///
/// Controllers consume the success events; they never raise them.
pub struct RemoteStore {
    client: Rc<dyn DavClient>,
    bus: EventBus,
}

impl RemoteStore {
    /// Binds `client` to `bus`.
    pub fn new(client: Rc<dyn DavClient>, bus: EventBus) -> Self {
        Self { client, bus }
    }

    /// Lists `path`; `None` when the client produced no listing.
    pub async fn list(&self, path: &str, bypass_cache: bool) -> Option<Rc<Collection>> {
        match self.client.list(path, bypass_cache).await {
            Ok(collection) => collection,
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Uploads `file` into `path`, raising [`DavEvent::UploadSuccess`] on success.
    pub async fn upload(&self, path: &str, file: &UploadFile) -> bool {
        let result = self.client.upload(path, file).await;
        self.settle(result, || DavEvent::UploadSuccess {
            path: path.to_string(),
            file: file.clone(),
        })
    }

    /// Moves `source` to `destination`, raising [`DavEvent::MoveSuccess`] on success.
    pub async fn move_resource(&self, source: &str, destination: &str) -> bool {
        let result = self.client.move_resource(source, destination).await;
        self.settle(result, || DavEvent::MoveSuccess {
            source: source.to_string(),
            destination: destination.to_string(),
        })
    }

    /// Deletes `path`, raising [`DavEvent::DeleteSuccess`] on success.
    pub async fn delete(&self, path: &str) -> bool {
        let result = self.client.delete(path).await;
        self.settle(result, || DavEvent::DeleteSuccess {
            path: path.to_string(),
        })
    }

    /// Creates the collection `path`, raising [`DavEvent::MkcolSuccess`] on success.
    pub async fn mkcol(&self, path: &str) -> bool {
        let result = self.client.mkcol(path).await;
        self.settle(result, || DavEvent::MkcolSuccess {
            path: path.to_string(),
        })
    }

    /// Fetches `path`.
    pub async fn get(&self, path: &str) -> Option<DavResponse> {
        match self.client.get(path).await {
            Ok(response) => response,
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Probes `uri`.
    pub async fn check(&self, uri: &str) -> Option<DavResponse> {
        match self.client.check(uri).await {
            Ok(response) => response,
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    fn settle(&self, result: Result<(), DavError>, success: impl FnOnce() -> DavEvent) -> bool {
        match result {
            Ok(()) => {
                self.bus.trigger(success());
                true
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    fn report(&self, err: DavError) {
        match err {
            DavError::Request(failure) => self.bus.trigger(DavEvent::Error(failure)),
            DavError::Unavailable(op) => warn!("remote store unavailable for {op}"),
        }
    }
}
