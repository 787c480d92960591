//! Authoritative listing state, listing cache, and rendering of the current collection.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use dav_host::{
    normalize_path, parent_path, strip_origin, Collection, Entry, EntrySpec, ListSurface,
};
use leptos::logging::log;

use crate::{DavEvent, EventBus, EventKind, GoRequest, RemoteStore};

#[derive(Debug, Clone)]
/// Exactly one of these describes the listing at any time.
pub enum ListingState {
    /// A fetch for `path` is outstanding (empty before the first request).
    Loading {
        /// Requested path.
        path: String,
    },
    /// The collection is rendered.
    Loaded(Rc<Collection>),
    /// The last fetch produced nothing.
    Failed,
}

impl ListingState {
    /// Returns `true` for [`ListingState::Loading`].
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

#[derive(Clone)]
/// Owns the listing cache and the current collection; the only writer of either.
pub struct ListSyncController {
    bus: EventBus,
    remote: RemoteStore,
    surface: Rc<dyn ListSurface>,
    origin: Rc<str>,
    cache: Rc<RefCell<HashMap<String, Rc<Collection>>>>,
    state: Rc<RefCell<ListingState>>,
}

impl ListSyncController {
    /// Creates a controller drawing onto `surface`. `origin` is stripped from absolute
    /// destination URLs when working out which listings a move affected.
    pub fn new(
        bus: EventBus,
        remote: RemoteStore,
        surface: Rc<dyn ListSurface>,
        origin: &str,
    ) -> Self {
        Self {
            bus,
            remote,
            surface,
            origin: Rc::from(origin),
            cache: Rc::default(),
            state: Rc::new(RefCell::new(ListingState::Loading {
                path: String::new(),
            })),
        }
    }

    /// Current listing state.
    pub fn state(&self) -> ListingState {
        self.state.borrow().clone()
    }

    /// Collection currently rendered, if any.
    pub fn current(&self) -> Option<Rc<Collection>> {
        match &*self.state.borrow() {
            ListingState::Loaded(collection) => Some(collection.clone()),
            _ => None,
        }
    }

    /// Cached listing for `path`.
    pub fn cached(&self, path: &str) -> Option<Rc<Collection>> {
        self.cache.borrow().get(&normalize_path(path)).cloned()
    }

    /// Returns the listing for `path`, from cache unless `bypass_cache` is set.
    pub async fn fetch(&self, path: &str, bypass_cache: bool) -> Option<Rc<Collection>> {
        if !bypass_cache {
            if let Some(hit) = self.cached(path) {
                return Some(hit);
            }
        }

        let collection = self.remote.list(path, bypass_cache).await?;
        self.cache
            .borrow_mut()
            .insert(normalize_path(path), collection.clone());
        Some(collection)
    }

    /// Subscribes to listing and mutation events.
    pub fn attach(&self) {
        let this = self.clone();
        self.bus.on(EventKind::ListUpdateRequest, move |event| {
            if let DavEvent::ListUpdateRequest { path } = event {
                *this.state.borrow_mut() = ListingState::Loading { path: path.clone() };
                this.surface.set_loading(true);
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::ListUpdateSuccess, move |event| {
            if let DavEvent::ListUpdateSuccess { collection } = event {
                this.render(collection.clone());
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::ListUpdateFailed, move |_| {
            *this.state.borrow_mut() = ListingState::Failed;
            this.surface.set_loading(false);
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::CollectionUpdate, move |event| {
            if let DavEvent::CollectionUpdate { collection } = event {
                this.replace_current_at_path(collection.clone());
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::EntryUpdate, move |event| {
            if let DavEvent::EntryUpdate { entry, replacement } = event {
                this.update_entry(entry, replacement.clone());
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::UploadSuccess, move |event| {
            if let DavEvent::UploadSuccess { path, .. } = event {
                this.invalidate(&[normalize_path(path)]);
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::MoveSuccess, move |event| {
            if let DavEvent::MoveSuccess {
                source,
                destination,
            } = event
            {
                let source = strip_origin(source, &this.origin);
                let destination = strip_origin(destination, &this.origin);
                this.invalidate(&[
                    parent_path(source),
                    parent_path(destination),
                    normalize_path(source),
                ]);
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::DeleteSuccess, move |event| {
            if let DavEvent::DeleteSuccess { path } = event {
                this.invalidate(&[parent_path(path), normalize_path(path)]);
            }
            Ok(())
        });

        let this = self.clone();
        self.bus.on(EventKind::MkcolSuccess, move |event| {
            if let DavEvent::MkcolSuccess { path } = event {
                this.invalidate(&[parent_path(path)]);
            }
            Ok(())
        });
    }

    fn render(&self, collection: Rc<Collection>) {
        self.surface.clear();
        for entry in collection.entries() {
            self.surface.append(entry);
        }
        self.surface.set_loading(false);
        *self.state.borrow_mut() = ListingState::Loaded(collection);
    }

    fn replace_current_at_path(&self, collection: Rc<Collection>) {
        let Some(current) = self.current() else {
            return;
        };
        if normalize_path(current.path()) != normalize_path(collection.path()) {
            return;
        }
        self.cache
            .borrow_mut()
            .insert(normalize_path(collection.path()), collection.clone());
        self.render(collection);
    }

    fn update_entry(&self, entry: &Entry, replacement: Option<EntrySpec>) {
        let Some(current) = self.current() else {
            return;
        };
        if !entry.belongs_to(&current) {
            return;
        }
        let collection = match replacement {
            Some(spec) => current.replacing_entry(entry.name(), spec),
            None => current,
        };
        self.cache
            .borrow_mut()
            .insert(normalize_path(collection.path()), collection.clone());
        self.render(collection);
    }

    /// Evicts every cached listing at or below `paths`; refreshes the path the browser shows
    /// when the current listing was one of them.
    fn invalidate(&self, paths: &[String]) {
        {
            let mut cache = self.cache.borrow_mut();
            cache.retain(|key, _| {
                !paths.iter().any(|path| {
                    key == path || (path != "/" && key.starts_with(&format!("{path}/")))
                })
            });
        }

        let Some(current) = self.current() else {
            return;
        };
        if paths.contains(&normalize_path(current.path())) {
            log!("refreshing {} after remote change", current.path());
            self.bus
                .trigger(DavEvent::Go(GoRequest::default().bypassing_cache()));
        }
    }
}
