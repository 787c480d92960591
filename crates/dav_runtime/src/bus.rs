//! Per-session publish/subscribe bus.
//!
//! Handlers run synchronously in registration order. Asynchronous work is handed to the injected
//! [`LocalSpawn`] executor so one slow handler never blocks its siblings. Re-entrant triggers
//! dispatch depth-first.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    future::Future,
    rc::Rc,
};

use futures::task::{LocalSpawn, LocalSpawnExt};
use leptos::logging::warn;

use crate::events::{DavEvent, EventKind};

type Handler = Rc<dyn Fn(&DavEvent) -> Result<(), String>>;

#[derive(Default)]
struct BusState {
    handlers: HashMap<EventKind, Vec<Handler>>,
    holds: usize,
    queued: VecDeque<DavEvent>,
}

#[derive(Clone)]
/// Message bus shared by every component of one browsing session.
///
/// Cloning is cheap and yields a handle to the same bus.
pub struct EventBus {
    state: Rc<RefCell<BusState>>,
    spawner: Rc<dyn LocalSpawn>,
}

impl EventBus {
    /// Creates an empty bus whose async handlers run on `spawner`.
    pub fn new(spawner: Rc<dyn LocalSpawn>) -> Self {
        Self {
            state: Rc::default(),
            spawner,
        }
    }

    /// Appends `handler` to the handler list for `kind`.
    ///
    /// A handler returning `Err` is logged; dispatch continues with the next handler.
    pub fn on(
        &self,
        kind: EventKind,
        handler: impl Fn(&DavEvent) -> Result<(), String> + 'static,
    ) {
        self.state
            .borrow_mut()
            .handlers
            .entry(kind)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Appends a handler whose returned future is spawned instead of awaited.
    ///
    /// The closure itself runs synchronously during dispatch, so work done before the returned
    /// future's first suspension point is observable as soon as `trigger` returns.
    pub fn on_async<F, Fut>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&DavEvent) -> Fut + 'static,
        Fut: Future<Output = Result<(), String>> + 'static,
    {
        let spawner = Rc::clone(&self.spawner);
        self.on(kind, move |event| {
            let task = handler(event);
            spawn_on(spawner.as_ref(), async move {
                if let Err(err) = task.await {
                    warn!("{kind} handler failed: {err}");
                }
            })
        });
    }

    /// Spawns a detached task on the session executor.
    ///
    /// # Errors
    ///
    /// Returns an error when the executor has shut down.
    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) -> Result<(), String> {
        spawn_on(self.spawner.as_ref(), task)
    }

    /// Dispatches `event` to every handler registered for its kind.
    ///
    /// While a [`DispatchHold`] is alive the event is queued instead and dispatched when the last
    /// hold is released.
    pub fn trigger(&self, event: DavEvent) {
        {
            let mut state = self.state.borrow_mut();
            if state.holds > 0 {
                state.queued.push_back(event);
                return;
            }
        }
        self.dispatch(&event);
    }

    /// Defers dispatch of newly triggered events until the returned guard is dropped.
    pub fn hold(&self) -> DispatchHold {
        self.state.borrow_mut().holds += 1;
        DispatchHold { bus: self.clone() }
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .handlers
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Number of events waiting for a hold to be released.
    pub fn queued_len(&self) -> usize {
        self.state.borrow().queued.len()
    }

    fn dispatch(&self, event: &DavEvent) {
        // Snapshot so handlers may register handlers or trigger events re-entrantly.
        let handlers = self
            .state
            .borrow()
            .handlers
            .get(&event.kind())
            .cloned()
            .unwrap_or_default();

        for handler in handlers {
            if let Err(err) = handler(event) {
                warn!("{} handler failed: {err}", event.kind());
            }
        }
    }

    fn release(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.holds = state.holds.saturating_sub(1);
        }

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                if state.holds > 0 {
                    None
                } else {
                    state.queued.pop_front()
                }
            };
            let Some(event) = next else {
                break;
            };
            self.dispatch(&event);
        }
    }
}

fn spawn_on(
    spawner: &dyn LocalSpawn,
    task: impl Future<Output = ()> + 'static,
) -> Result<(), String> {
    spawner
        .spawn_local(task)
        .map_err(|err| format!("failed to spawn task: {err}"))
}

/// Guard returned by [`EventBus::hold`]; queued events flush when the last guard drops.
#[must_use = "events are only held while the guard is alive"]
pub struct DispatchHold {
    bus: EventBus,
}

impl Drop for DispatchHold {
    fn drop(&mut self) {
        self.bus.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::{
        channel::oneshot,
        executor::{LocalPool, LocalSpawner},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn bus_with_pool() -> (EventBus, LocalPool) {
        let pool = LocalPool::new();
        let spawner: LocalSpawner = pool.spawner();
        (EventBus::new(Rc::new(spawner)), pool)
    }

    fn record(bus: &EventBus, kind: EventKind, log: &Rc<RefCell<Vec<String>>>, tag: &str) {
        let log = log.clone();
        let tag = tag.to_string();
        bus.on(kind, move |event| {
            log.borrow_mut().push(format!("{tag}:{}", event.kind()));
            Ok(())
        });
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let (bus, _pool) = bus_with_pool();
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&bus, EventKind::ListUpdateFailed, &log, "first");
        record(&bus, EventKind::ListUpdateFailed, &log, "second");
        record(&bus, EventKind::MkcolSuccess, &log, "other");

        bus.trigger(DavEvent::ListUpdateFailed);

        assert_eq!(
            *log.borrow(),
            vec![
                "first:list:update:failed".to_string(),
                "second:list:update:failed".to_string()
            ]
        );
        assert_eq!(bus.handler_count(EventKind::ListUpdateFailed), 2);
    }

    #[test]
    fn failing_handler_does_not_block_siblings() {
        let (bus, _pool) = bus_with_pool();
        let reached = Rc::new(Cell::new(false));
        bus.on(EventKind::ListUpdateFailed, |_| Err("boom".to_string()));
        let flag = reached.clone();
        bus.on(EventKind::ListUpdateFailed, move |_| {
            flag.set(true);
            Ok(())
        });

        bus.trigger(DavEvent::ListUpdateFailed);

        assert!(reached.get());
    }

    #[test]
    fn reentrant_trigger_resolves_depth_first() {
        let (bus, _pool) = bus_with_pool();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_bus = bus.clone();
        let outer_log = log.clone();
        bus.on(EventKind::ListUpdateFailed, move |_| {
            outer_log.borrow_mut().push("outer-start".to_string());
            inner_bus.trigger(DavEvent::MkcolSuccess {
                path: "/x/".to_string(),
            });
            outer_log.borrow_mut().push("outer-end".to_string());
            Ok(())
        });
        record(&bus, EventKind::MkcolSuccess, &log, "inner");
        record(&bus, EventKind::ListUpdateFailed, &log, "sibling");

        bus.trigger(DavEvent::ListUpdateFailed);

        assert_eq!(
            *log.borrow(),
            vec![
                "outer-start".to_string(),
                "inner:mkcol:success".to_string(),
                "outer-end".to_string(),
                "sibling:list:update:failed".to_string(),
            ]
        );
    }

    #[test]
    fn async_handler_does_not_block_dispatch() {
        let (bus, mut pool) = bus_with_pool();
        let (tx, rx) = oneshot::channel::<()>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let finished = Rc::new(Cell::new(false));
        let sibling = Rc::new(Cell::new(false));

        let done = finished.clone();
        bus.on_async(EventKind::ListUpdateFailed, move |_| {
            let rx = rx.borrow_mut().take();
            let done = done.clone();
            async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                done.set(true);
                Ok(())
            }
        });
        let seen = sibling.clone();
        bus.on(EventKind::ListUpdateFailed, move |_| {
            seen.set(true);
            Ok(())
        });

        bus.trigger(DavEvent::ListUpdateFailed);
        pool.run_until_stalled();
        assert!(sibling.get());
        assert!(!finished.get());

        tx.send(()).expect("receiver alive");
        pool.run_until_stalled();
        assert!(finished.get());
    }

    #[test]
    fn held_events_flush_in_order_on_release() {
        let (bus, _pool) = bus_with_pool();
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&bus, EventKind::ListUpdateFailed, &log, "a");
        record(&bus, EventKind::MkcolSuccess, &log, "b");

        let outer = bus.hold();
        let inner = bus.hold();
        bus.trigger(DavEvent::ListUpdateFailed);
        bus.trigger(DavEvent::MkcolSuccess {
            path: "/d/".to_string(),
        });
        assert_eq!(bus.queued_len(), 2);

        drop(inner);
        assert!(log.borrow().is_empty());

        drop(outer);
        assert_eq!(
            *log.borrow(),
            vec![
                "a:list:update:failed".to_string(),
                "b:mkcol:success".to_string()
            ]
        );
        assert_eq!(bus.queued_len(), 0);
    }

    #[test]
    fn handlers_registered_during_dispatch_miss_the_in_flight_event() {
        let (bus, _pool) = bus_with_pool();
        let late_calls = Rc::new(Cell::new(0));
        let registering_bus = bus.clone();
        let counter = late_calls.clone();
        bus.on(EventKind::ListUpdateFailed, move |_| {
            let counter = counter.clone();
            registering_bus.on(EventKind::ListUpdateFailed, move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            });
            Ok(())
        });

        bus.trigger(DavEvent::ListUpdateFailed);
        assert_eq!(late_calls.get(), 0);

        bus.trigger(DavEvent::ListUpdateFailed);
        assert_eq!(late_calls.get(), 1);
    }
}
