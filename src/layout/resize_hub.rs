use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::trace;

use crate::core::ContainerSize;

type ResizeListener = Rc<dyn Fn(ContainerSize)>;

struct HubInner {
    current: ContainerSize,
    next_id: u64,
    listeners: IndexMap<u64, ResizeListener>,
}

/// Single-threaded source of container resize events.
///
/// Plays the role of the browser window's resize event target: it remembers
/// the current container size and notifies subscribers on every change.
#[derive(Clone)]
pub struct ResizeHub {
    inner: Rc<RefCell<HubInner>>,
}

impl std::fmt::Debug for ResizeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ResizeHub")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ResizeHub {
    #[must_use]
    pub fn new(initial: ContainerSize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                current: initial,
                next_id: 0,
                listeners: IndexMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn current_size(&self) -> ContainerSize {
        self.inner.borrow().current
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Registers `listener`; it stays registered until the guard is dropped.
    #[must_use = "dropping the subscription immediately unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> ResizeSubscription
    where
        F: Fn(ContainerSize) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Rc::new(listener));
        trace!(id, listeners = inner.listeners.len(), "resize listener added");
        ResizeSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Records the new size and notifies every listener.
    ///
    /// Listeners are snapshotted first, so one may drop its own subscription
    /// (or subscribe another) while being called.
    pub fn dispatch(&self, size: ContainerSize) {
        let listeners: Vec<ResizeListener> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = size;
            inner.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener(size);
        }
    }
}

/// Guard owning one resize listener registration.
///
/// Dropping it removes the listener, on normal teardown and early returns
/// alike. Outliving the hub is harmless.
#[derive(Debug)]
pub struct ResizeSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl ResizeSubscription {
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(hub) = self.hub.upgrade() else {
            return false;
        };
        let inner = hub.borrow();
        inner.listeners.contains_key(&self.id)
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut inner = hub.borrow_mut();
            inner.listeners.shift_remove(&self.id);
            trace!(
                id = self.id,
                listeners = inner.listeners.len(),
                "resize listener removed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{ResizeHub, ResizeSubscription};
    use crate::core::ContainerSize;

    #[test]
    fn dropping_subscription_unregisters_listener() {
        let hub = ResizeHub::new(ContainerSize::square(400.0));
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = hub.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch(ContainerSize::square(500.0));
        drop(subscription);
        hub.dispatch(ContainerSize::square(600.0));

        assert_eq!(calls.get(), 1);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.current_size(), ContainerSize::square(600.0));
    }

    #[test]
    fn listener_may_drop_its_own_subscription() {
        let hub = ResizeHub::new(ContainerSize::square(400.0));
        let slot: Rc<RefCell<Option<ResizeSubscription>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let subscription = hub.subscribe(move |_| {
            inner_slot.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        hub.dispatch(ContainerSize::square(300.0));
        assert_eq!(hub.listener_count(), 0);
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn subscription_outliving_hub_drops_cleanly() {
        let hub = ResizeHub::new(ContainerSize::square(400.0));
        let subscription = hub.subscribe(|_| {});
        drop(hub);
        assert!(!subscription.is_active());
        drop(subscription);
    }
}
