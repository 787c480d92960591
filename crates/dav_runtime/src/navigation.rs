//! Navigation: turns `go` requests and browser back/forward into listing refreshes and keeps the
//! document title and history in step with the rendered listing.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use dav_host::{decode_path, normalize_path, BrowserHistory, SessionConfig};
use leptos::logging::log;

use crate::{DavEvent, EventBus, EventKind, GoRequest, ListSyncController};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Paths of the two most recent successful navigations.
pub struct NavigationState {
    /// Path of the rendered listing.
    pub current_path: String,
    /// Path rendered before it.
    pub previous_path: String,
}

#[derive(Clone)]
/// Handles [`DavEvent::Go`].
///
/// Every `go` takes a new request generation. A listing that resolves after a newer `go` has
/// started is dropped, so overlapping navigations can never regress the view to an older path.
pub struct NavigationController {
    bus: EventBus,
    list: ListSyncController,
    history: Rc<dyn BrowserHistory>,
    config: Rc<SessionConfig>,
    generation: Rc<Cell<u64>>,
    state: Rc<RefCell<NavigationState>>,
}

impl NavigationController {
    /// Creates a controller fetching through `list`.
    pub fn new(
        bus: EventBus,
        list: ListSyncController,
        history: Rc<dyn BrowserHistory>,
        config: Rc<SessionConfig>,
    ) -> Self {
        Self {
            bus,
            list,
            history,
            config,
            generation: Rc::default(),
            state: Rc::default(),
        }
    }

    /// Paths of the latest successful navigations.
    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Starts navigating.
    ///
    /// [`DavEvent::ListUpdateRequest`] is emitted before this returns; the returned future
    /// performs the fetch and publishes the outcome.
    pub fn go(&self, request: GoRequest) -> impl Future<Output = ()> + 'static {
        let start_path = self.history.current_path();
        let path = request.path.clone().unwrap_or_else(|| start_path.clone());
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        self.bus.trigger(DavEvent::ListUpdateRequest { path: path.clone() });

        let this = self.clone();
        async move {
            let collection = this.list.fetch(&path, request.bypass_cache).await;

            if this.generation.get() != generation {
                log!("dropping superseded listing for {path}");
                return;
            }

            let Some(collection) = collection else {
                this.bus.trigger(DavEvent::ListUpdateFailed);
                if let Some(on_failure) = &request.on_failure {
                    on_failure.call(());
                }
                return;
            };

            this.bus.trigger(DavEvent::ListUpdateSuccess { collection });

            if normalize_path(&path) != normalize_path(&start_path) {
                this.history.push_path(&path);
            }
            this.history
                .set_title(&this.config.title_for(&decode_path(&path)));

            let mut state = this.state.borrow_mut();
            let previous = std::mem::replace(&mut state.current_path, path);
            state.previous_path = previous;
        }
    }

    /// Re-issues `go` for the path the browser now reports; wired to back/forward navigation.
    pub fn on_history_change(&self) {
        self.bus.trigger(DavEvent::Go(GoRequest::default()));
    }

    /// Subscribes to [`DavEvent::Go`].
    pub fn attach(&self) {
        let this = self.clone();
        self.bus.on_async(EventKind::Go, move |event| {
            let request = match event {
                DavEvent::Go(request) => request.clone(),
                _ => GoRequest::default(),
            };
            let task = this.go(request);
            async move {
                task.await;
                Ok(())
            }
        });
    }
}
