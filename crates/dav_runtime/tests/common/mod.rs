//! Shared session harness for the integration tests.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use dav_host::{
    Capabilities, Collection, ConfirmFuture, ConfirmService, DavClient, DavError, DavFuture,
    DavResponse, Entry, FixedConfirmService, HostServices, MemoryDavClient, MemoryHistory,
    MemoryToastService, SessionConfig, UploadFile,
};
use dav_runtime::{DavEvent, DavSession, EventBus, EventKind, FocusSurface, ListSurface};
use futures::{
    channel::oneshot,
    executor::{LocalPool, LocalSpawner},
};

/// Listing surface recording every call and the rows currently shown.
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: RefCell<Vec<String>>,
    pub rows: RefCell<Vec<String>>,
    pub loading: Cell<bool>,
    pub focused: Cell<Option<usize>>,
}

impl RecordingSurface {
    pub fn rows(&self) -> Vec<String> {
        self.rows.borrow().clone()
    }
}

impl ListSurface for RecordingSurface {
    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        self.ops.borrow_mut().push(format!("loading {loading}"));
    }

    fn clear(&self) {
        self.rows.borrow_mut().clear();
        self.focused.set(None);
        self.ops.borrow_mut().push("clear".to_string());
    }

    fn append(&self, entry: &Entry) {
        self.rows.borrow_mut().push(entry.name().to_string());
        self.ops.borrow_mut().push(format!("append {}", entry.name()));
    }
}

impl FocusSurface for RecordingSurface {
    fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn focused_row(&self) -> Option<usize> {
        self.focused.get()
    }

    fn focus_row(&self, index: usize) {
        self.focused.set(Some(index));
    }
}

/// Client whose listings for gated paths wait until the gate is opened.
#[derive(Clone)]
pub struct GatedClient {
    inner: MemoryDavClient,
    gates: Rc<RefCell<HashMap<String, oneshot::Receiver<()>>>>,
}

impl GatedClient {
    pub fn new(inner: MemoryDavClient) -> Self {
        Self {
            inner,
            gates: Rc::default(),
        }
    }

    /// Holds the next listing of `path` until the returned sender fires.
    pub fn gate(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(path.to_string(), rx);
        tx
    }
}

impl DavClient for GatedClient {
    fn list<'a>(
        &'a self,
        path: &'a str,
        bypass_cache: bool,
    ) -> DavFuture<'a, Result<Option<Rc<Collection>>, DavError>> {
        let gate = self.gates.borrow_mut().remove(path);
        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.inner.list(path, bypass_cache).await
        })
    }

    fn upload<'a>(
        &'a self,
        path: &'a str,
        file: &'a UploadFile,
    ) -> DavFuture<'a, Result<(), DavError>> {
        self.inner.upload(path, file)
    }

    fn move_resource<'a>(
        &'a self,
        source: &'a str,
        destination: &'a str,
    ) -> DavFuture<'a, Result<(), DavError>> {
        self.inner.move_resource(source, destination)
    }

    fn delete<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<(), DavError>> {
        self.inner.delete(path)
    }

    fn get<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<Option<DavResponse>, DavError>> {
        self.inner.get(path)
    }

    fn check<'a>(
        &'a self,
        uri: &'a str,
    ) -> DavFuture<'a, Result<Option<DavResponse>, DavError>> {
        self.inner.check(uri)
    }

    fn mkcol<'a>(&'a self, path: &'a str) -> DavFuture<'a, Result<(), DavError>> {
        self.inner.mkcol(path)
    }
}

/// Confirmation prompt that stays open until the test answers it.
pub struct PendingConfirm {
    answer: RefCell<Option<oneshot::Receiver<bool>>>,
    asked: Cell<usize>,
}

impl PendingConfirm {
    pub fn new() -> (Rc<Self>, oneshot::Sender<bool>) {
        let (tx, rx) = oneshot::channel();
        let confirm = Rc::new(Self {
            answer: RefCell::new(Some(rx)),
            asked: Cell::new(0),
        });
        (confirm, tx)
    }

    pub fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl ConfirmService for PendingConfirm {
    fn confirm<'a>(&'a self, _message: &'a str) -> ConfirmFuture<'a, bool> {
        self.asked.set(self.asked.get() + 1);
        let answer = self.answer.borrow_mut().take();
        Box::pin(async move {
            match answer {
                Some(answer) => answer.await.unwrap_or(false),
                None => false,
            }
        })
    }
}

/// One wired session plus handles to every in-memory host service.
pub struct Harness {
    pub pool: LocalPool,
    pub session: DavSession,
    pub history: MemoryHistory,
    pub toasts: MemoryToastService,
    pub surface: Rc<RecordingSurface>,
    pub events: Rc<RefCell<Vec<EventKind>>>,
}

const RECORDED: [EventKind; 9] = [
    EventKind::ListUpdateRequest,
    EventKind::ListUpdateSuccess,
    EventKind::ListUpdateFailed,
    EventKind::UploadSuccess,
    EventKind::MoveSuccess,
    EventKind::DeleteSuccess,
    EventKind::MkcolSuccess,
    EventKind::Error,
    EventKind::Go,
];

impl Harness {
    /// Session over `client` that accepts every overwrite, starting at `initial_path`.
    pub fn new(client: &MemoryDavClient, initial_path: &str) -> Self {
        Self::assemble(
            Rc::new(client.clone()),
            Rc::new(FixedConfirmService::new(true)),
            initial_path,
        )
    }

    /// Same as [`Harness::new`] with a non-default session config.
    pub fn configured(client: &MemoryDavClient, initial_path: &str, config: SessionConfig) -> Self {
        Self::build(
            Rc::new(client.clone()),
            Rc::new(FixedConfirmService::new(true)),
            initial_path,
            config,
        )
    }

    pub fn assemble(
        client: Rc<dyn DavClient>,
        confirm: Rc<dyn ConfirmService>,
        initial_path: &str,
    ) -> Self {
        Self::build(client, confirm, initial_path, SessionConfig::default())
    }

    fn build(
        client: Rc<dyn DavClient>,
        confirm: Rc<dyn ConfirmService>,
        initial_path: &str,
        config: SessionConfig,
    ) -> Self {
        let pool = LocalPool::new();
        let spawner: LocalSpawner = pool.spawner();
        let bus = EventBus::new(Rc::new(spawner));
        let history = MemoryHistory::new(initial_path);
        let toasts = MemoryToastService::default();
        let surface = Rc::new(RecordingSurface::default());

        let services = HostServices {
            client,
            history: Rc::new(history.clone()),
            confirm,
            toasts: Rc::new(toasts.clone()),
            capabilities: Capabilities::desktop(),
            config,
        };
        let session = DavSession::new(services, bus, surface.clone(), surface.clone());

        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in RECORDED {
            let events = events.clone();
            session.bus().on(kind, move |event| {
                events.borrow_mut().push(event.kind());
                Ok(())
            });
        }

        Self {
            pool,
            session,
            history,
            toasts,
            surface,
            events,
        }
    }

    pub fn trigger(&self, event: DavEvent) {
        self.session.bus().trigger(event);
    }

    /// Runs every spawned task until none can make progress.
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.borrow().iter().filter(|seen| **seen == kind).count()
    }

    pub fn toast_texts(&self) -> Vec<String> {
        self.toasts.shown().into_iter().map(|toast| toast.content).collect()
    }

    pub fn rendered_path(&self) -> Option<String> {
        self.session
            .list()
            .current()
            .map(|collection| collection.path().to_string())
    }
}

/// `/docs` holding `a.txt`, plus an empty `/archive`.
pub fn docs_tree() -> MemoryDavClient {
    MemoryDavClient::default()
        .with_file("/docs/a.txt", "hello")
        .with_directory("/archive")
}

pub fn list_calls(client: &MemoryDavClient, path: &str) -> usize {
    let call = format!("list {path}");
    client.calls().iter().filter(|seen| **seen == call).count()
}
