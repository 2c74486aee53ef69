use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Single-threaded observer list.
///
/// Every `subscribe` hands back a [`Subscription`] guard; dropping the guard
/// deregisters the callback. Emission works on a snapshot of the listener
/// list, so callbacks may subscribe or drop subscriptions while being
/// notified.
pub struct EventBus<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> EventBus<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.listeners.push((id, Rc::new(listener)));
            id
        };
        tracing::trace!(listener = id, "subscribed");

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                // Bus may already be gone; nothing to release then.
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                    tracing::trace!(listener = id, "unsubscribed");
                }
            })),
        }
    }

    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T: 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// Registration handle returned by [`EventBus::subscribe`].
///
/// The callback stays registered for exactly as long as this value lives.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Explicit form of dropping the guard.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_to_all_listeners_in_order() {
        let bus = EventBus::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let b = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };
        bus.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn dropping_subscription_deregisters() {
        let bus = EventBus::<u32>::new();
        let hits = Rc::new(RefCell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            bus.subscribe(move |_| *hits.borrow_mut() += 1)
        };
        assert_eq!(bus.listener_count(), 1);
        bus.emit(&1);
        drop(sub);
        assert_eq!(bus.listener_count(), 0);
        bus.emit(&2);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn cancel_is_equivalent_to_drop() {
        let bus = EventBus::<()>::new();
        let sub = bus.subscribe(|_| {});
        sub.cancel();
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus = EventBus::<u8>::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn listener_may_unsubscribe_during_emit() {
        let bus = Rc::new(EventBus::<u8>::new());
        let slot: Rc<RefCell<Option<super::Subscription>>> = Rc::new(RefCell::new(None));
        let sub = {
            let slot = Rc::clone(&slot);
            bus.subscribe(move |_| {
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(sub);
        bus.emit(&0);
        assert_eq!(bus.listener_count(), 0);
    }
}
