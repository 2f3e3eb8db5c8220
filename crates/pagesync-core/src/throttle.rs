//! Keyed trailing-edge throttle.
//!
//! The first `schedule` for a key arms a timer; further calls for that key
//! are dropped until the timer fires. The action runs against live state at
//! fire time, then the key is released.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use crate::platform::{TimerId, Timers};

pub struct Throttler {
    timers: Rc<dyn Timers>,
    pending: Rc<RefCell<HashMap<String, TimerId>>>,
}

impl Throttler {
    pub fn new(timers: Rc<dyn Timers>) -> Self {
        Self {
            timers,
            pending: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Arm `action` under `key` unless a handler for `key` is already
    /// outstanding. Returns `true` when a new handler was armed.
    pub fn schedule(&self, key: &str, delay: Duration, action: impl FnOnce() + 'static) -> bool {
        if self.pending.borrow().contains_key(key) {
            trace!(key, "throttled");
            return false;
        }

        let pending = Rc::downgrade(&self.pending);
        let owned_key = key.to_string();
        let timer = self.timers.set_timeout(
            delay,
            Box::new(move || {
                action();
                if let Some(pending) = pending.upgrade() {
                    pending.borrow_mut().remove(&owned_key);
                }
            }),
        );
        self.pending.borrow_mut().insert(key.to_string(), timer);
        trace!(key, delay_ms = delay.as_millis() as u64, "throttle armed");
        true
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.borrow().contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}
