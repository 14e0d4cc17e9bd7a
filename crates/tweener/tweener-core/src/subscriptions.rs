//! Subscription registry for scene state listeners.
//!
//! Listeners are identified by their `Rc` allocation: subscribing the same
//! `Rc` twice registers it once. Notification order is unspecified.
//!
//! The registry is single-threaded. A listener may unsubscribe itself or any
//! other listener while being notified; listeners removed mid-round are not
//! called for the rest of that round.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;

use crate::ids::{IdAllocator, SubscriptionId};
use crate::outputs::SceneState;

/// Callback receiving each freshly computed scene state.
pub type Listener<V> = Rc<dyn Fn(&SceneState<V>)>;

struct Registry<V> {
    ids: IdAllocator,
    entries: HashMap<SubscriptionId, Listener<V>>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            ids: IdAllocator::new(),
            entries: HashMap::new(),
        }
    }
}

/// Shared handle to a set of listeners. Clones address the same set.
pub struct Subscriptions<V> {
    inner: Rc<RefCell<Registry<V>>>,
}

impl<V> Clone for Subscriptions<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> Default for Subscriptions<V> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry::default())),
        }
    }
}

impl<V> fmt::Debug for Subscriptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions")
            .field("len", &self.len())
            .finish()
    }
}

impl<V> Subscriptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. Re-registering an already present `Rc` returns a
    /// handle to the existing entry.
    pub fn subscribe(&self, listener: Listener<V>) -> Subscription<V> {
        let mut reg = self.inner.borrow_mut();
        let existing = reg
            .entries
            .iter()
            .find(|(_, l)| Rc::ptr_eq(l, &listener))
            .map(|(id, _)| *id);
        let id = match existing {
            Some(id) => id,
            None => {
                let id = reg.ids.alloc_subscription();
                reg.entries.insert(id, listener);
                id
            }
        };
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Convenience for closures; each call registers a distinct listener.
    pub fn subscribe_fn(&self, f: impl Fn(&SceneState<V>) + 'static) -> Subscription<V>
    where
        V: 'static,
    {
        self.subscribe(Rc::new(f))
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.inner.borrow().entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Call every listener with `state`. Returns how many were called.
    pub fn notify(&self, state: &SceneState<V>) -> usize {
        let snapshot: Vec<(SubscriptionId, Listener<V>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        let mut called = 0;
        for (id, listener) in snapshot {
            if !self.contains(id) {
                continue;
            }
            listener(state);
            called += 1;
        }
        called
    }
}

/// Handle returned by [`Subscriptions::subscribe`].
///
/// Dropping the handle does not unsubscribe.
pub struct Subscription<V> {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry<V>>>,
}

impl<V> Subscription<V> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener. Safe to call any number of times, and after the
    /// registry itself is gone.
    pub fn unsubscribe(&self) {
        if let Some(reg) = self.registry.upgrade() {
            reg.borrow_mut().entries.remove(&self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|reg| reg.borrow().entries.contains_key(&self.id))
    }
}

impl<V> fmt::Debug for Subscription<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::cell::Cell;

    fn state() -> SceneState<f64> {
        SceneState::new(0.0, IndexMap::new())
    }

    #[test]
    fn same_rc_registers_once() {
        let subs = Subscriptions::<f64>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let listener: Listener<f64> = Rc::new(move |_: &SceneState<f64>| h.set(h.get() + 1));

        let a = subs.subscribe(Rc::clone(&listener));
        let b = subs.subscribe(listener);
        assert_eq!(a.id(), b.id());
        assert_eq!(subs.len(), 1);

        subs.notify(&state());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let subs = Subscriptions::<f64>::new();
        let sub = subs.subscribe_fn(|_| {});
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert!(subs.is_empty());
    }

    #[test]
    fn unsubscribe_after_registry_dropped_is_noop() {
        let subs = Subscriptions::<f64>::new();
        let sub = subs.subscribe_fn(|_| {});
        drop(subs);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn listener_can_remove_itself_during_notify() {
        let subs = Subscriptions::<f64>::new();
        let slot: Rc<RefCell<Option<Subscription<f64>>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let (s, h) = (Rc::clone(&slot), Rc::clone(&hits));
        let sub = subs.subscribe_fn(move |_| {
            h.set(h.get() + 1);
            if let Some(me) = s.borrow().as_ref() {
                me.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(sub);

        assert_eq!(subs.notify(&state()), 1);
        assert_eq!(subs.notify(&state()), 0);
        assert_eq!(hits.get(), 1);
    }
}
