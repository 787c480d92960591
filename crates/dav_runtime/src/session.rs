//! Session composition: one bus, one remote store, and every controller wired onto them.

use std::rc::Rc;

use dav_host::{Capabilities, HostServices};

use crate::{
    DavEvent, EventBus, FocusSurface, GoRequest, KeyboardNavigator, ListSurface,
    ListSyncController, NavigationController, RemoteStore, ResourceRelay, UploadController,
};

#[derive(Clone)]
/// One browsing session against one remote root.
pub struct DavSession {
    bus: EventBus,
    list: ListSyncController,
    navigation: NavigationController,
    upload: UploadController,
    keyboard: KeyboardNavigator,
    capabilities: Capabilities,
}

impl DavSession {
    /// Builds every controller on `bus` and subscribes them.
    ///
    /// Listing handlers are attached first so rendering state changes before any other
    /// subscriber observes a listing event.
    pub fn new(
        services: HostServices,
        bus: EventBus,
        surface: Rc<dyn ListSurface>,
        focus: Rc<dyn FocusSurface>,
    ) -> Self {
        let capabilities = services.capabilities;
        let config = Rc::new(services.config);
        let remote = RemoteStore::new(services.client, bus.clone());
        let list = ListSyncController::new(bus.clone(), remote.clone(), surface, &config.origin);
        let navigation = NavigationController::new(
            bus.clone(),
            list.clone(),
            services.history.clone(),
            config.clone(),
        );
        let upload = UploadController::new(
            bus.clone(),
            list.clone(),
            remote.clone(),
            services.history,
            services.confirm,
        );
        let relay = ResourceRelay::new(bus.clone(), remote, services.toasts, config);

        list.attach();
        navigation.attach();
        upload.attach();
        relay.attach();

        Self {
            bus,
            list,
            navigation,
            upload,
            keyboard: KeyboardNavigator::new(focus),
            capabilities,
        }
    }

    /// Loads the listing for the path the browser currently shows.
    pub fn start(&self) {
        self.bus.trigger(DavEvent::Go(GoRequest::default()));
    }

    /// Session bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Listing owner.
    pub fn list(&self) -> &ListSyncController {
        &self.list
    }

    /// Navigation controller.
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Upload controller.
    pub fn upload(&self) -> &UploadController {
        &self.upload
    }

    /// Row keyboard navigator.
    pub fn keyboard(&self) -> &KeyboardNavigator {
        &self.keyboard
    }

    /// Input capabilities the host reported; decides which page interactions get wired.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}
