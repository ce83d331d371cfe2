//! Callback registry with scoped subscription handles.
//!
//! Replaces blanket listener removal: each registration returns a
//! [`Subscription`] that unregisters its handler exactly once, either on an
//! explicit [`Subscription::unsubscribe`] or on drop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use vf_frame_types::{HostEvent, HostEventKind};

pub type EventHandler = Rc<dyn Fn(&HostEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<u64, (HostEventKind, EventHandler)>,
}

/// Single-threaded event dispatch for host lifecycle events.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: HostEventKind, handler: EventHandler) -> Subscription {
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.insert(id, (kind, handler));
            id
        };

        let registry = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = Weak::upgrade(&registry) {
                registry.borrow_mut().handlers.remove(&id);
            }
        })
    }

    /// Dispatch an event to every handler registered for its kind.
    ///
    /// Handlers are snapshotted before dispatch, so a handler that
    /// subscribes or unsubscribes mid-emit does not affect the in-flight
    /// event.
    pub fn emit(&self, event: &HostEvent) {
        let kind = event.kind();
        let matching: Vec<EventHandler> = self
            .inner
            .borrow()
            .handlers
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| Rc::clone(h))
            .collect();

        for handler in matching {
            handler(event);
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// Handle to one registration. Releasing it twice is impossible; releasing
/// it after its registry is gone is a no-op.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
