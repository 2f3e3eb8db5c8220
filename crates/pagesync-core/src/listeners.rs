//! Callback registry shared by feed implementations.
//!
//! Callbacks may cancel their own (or another) subscription while being
//! dispatched; a callback is taken out of its slot for the duration of the
//! call, so no `RefCell` borrow is held while user code runs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::Subscription;

type Callback<T> = Box<dyn FnMut(&T)>;

struct Slot<T> {
    id: u64,
    callback: Option<Callback<T>>,
}

struct Slots<T> {
    next_id: u64,
    entries: Vec<Slot<T>>,
}

/// Ordered set of callbacks notified with a `&T`.
pub struct Listeners<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register `callback`; the returned handle removes it.
    pub fn add(&self, callback: Callback<T>) -> Subscription {
        let id = self.insert(callback);
        self.subscription_for(id)
    }

    /// Register `callback` and deliver `value` to it alone, right away.
    pub fn add_and_notify(&self, callback: Callback<T>, value: &T) -> Subscription {
        let id = self.insert(callback);
        self.notify_one(id, value);
        self.subscription_for(id)
    }

    /// Notify every callback registered before this call, in registration
    /// order. Returns how many were invoked.
    pub fn dispatch(&self, value: &T) -> usize {
        let ids: Vec<u64> = self.slots.borrow().entries.iter().map(|s| s.id).collect();
        ids.into_iter()
            .filter(|&id| self.notify_one(id, value))
            .count()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, callback: Callback<T>) -> u64 {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.entries.push(Slot {
            id,
            callback: Some(callback),
        });
        id
    }

    fn notify_one(&self, id: u64, value: &T) -> bool {
        let taken = self
            .slots
            .borrow_mut()
            .entries
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| s.callback.take());

        let Some(mut callback) = taken else {
            return false;
        };
        callback(value);

        // Put it back unless the callback cancelled itself.
        if let Some(slot) = self
            .slots
            .borrow_mut()
            .entries
            .iter_mut()
            .find(|s| s.id == id)
        {
            slot.callback = Some(callback);
        }
        true
    }

    fn subscription_for(&self, id: u64) -> Subscription {
        let weak = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.borrow_mut().entries.retain(|s| s.id != id);
            }
        })
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}
