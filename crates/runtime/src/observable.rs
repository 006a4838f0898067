//! Single-writer observable values.
//!
//! An [`Observable`] is the only handle that can change the value. Any number
//! of [`ObservableReader`]s can read it or subscribe to changes. Everything is
//! single-threaded (`Rc`/`RefCell`): the journey view runs on one event loop.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Shared<T> {
    value: RefCell<T>,
    next_id: Cell<u64>,
    listeners: RefCell<BTreeMap<u64, Listener<T>>>,
    notifying: Cell<bool>,
    // Ids unsubscribed while their listener was checked out for notification.
    removed_while_notifying: RefCell<BTreeSet<u64>>,
}

trait ListenerSet {
    fn remove(&self, id: u64);
}

impl<T> ListenerSet for Shared<T> {
    fn remove(&self, id: u64) {
        if self.listeners.borrow_mut().remove(&id).is_none() && self.notifying.get() {
            self.removed_while_notifying.borrow_mut().insert(id);
        }
    }
}

impl<T> Shared<T> {
    fn subscribe(&self, listener: Listener<T>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    fn notify(&self) {
        let mut checked_out = std::mem::take(&mut *self.listeners.borrow_mut());
        self.notifying.set(true);
        {
            let value = self.value.borrow();
            for listener in checked_out.values_mut() {
                listener(&value);
            }
        }
        self.notifying.set(false);

        for id in std::mem::take(&mut *self.removed_while_notifying.borrow_mut()) {
            checked_out.remove(&id);
        }
        let mut listeners = self.listeners.borrow_mut();
        // Listeners added during notification land in the (now empty) live map.
        checked_out.append(&mut listeners);
        *listeners = checked_out;
    }
}

/// The writing half. Deliberately not `Clone`.
pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

/// A read-only view of an [`Observable`].
pub struct ObservableReader<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for ObservableReader<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    set: Weak<dyn ListenerSet>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(set) = self.set.upgrade() {
            set.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T: Copy + PartialEq + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(initial),
                next_id: Cell::new(0),
                listeners: RefCell::new(BTreeMap::new()),
                notifying: Cell::new(false),
                removed_while_notifying: RefCell::new(BTreeSet::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        *self.shared.value.borrow()
    }

    /// Stores `value` and notifies listeners if it differs from the current
    /// one. Returns whether a change happened.
    pub fn set(&mut self, value: T) -> bool {
        if *self.shared.value.borrow() == value {
            return false;
        }
        *self.shared.value.borrow_mut() = value;
        self.shared.notify();
        true
    }

    pub fn reader(&self) -> ObservableReader<T> {
        ObservableReader {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        subscribe(&self.shared, listener)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }
}

impl<T: Copy + PartialEq + 'static> ObservableReader<T> {
    pub fn get(&self) -> T {
        *self.shared.value.borrow()
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        subscribe(&self.shared, listener)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }
}

fn subscribe<T: 'static>(
    shared: &Rc<Shared<T>>,
    listener: impl FnMut(&T) + 'static,
) -> Subscription {
    let id = shared.subscribe(Box::new(listener));
    let set: Rc<dyn ListenerSet> = shared.clone();
    Subscription {
        id,
        set: Rc::downgrade(&set),
    }
}
