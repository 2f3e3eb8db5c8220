//! One-shot detection of a dynamically created element.
//!
//! `ElementWatcher` listens to structural mutations while `Searching` and
//! re-queries the document on every batch. The first time the target is
//! present it moves to `Found`, cancels its own subscription and runs the
//! `on_found` callback. `Found` is terminal: removing and re-inserting the
//! element later does not re-arm the watcher.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::platform::{Document, MutationBatch, MutationFeed, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Searching,
    Found,
}

impl fmt::Display for WatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Searching => f.write_str("searching"),
            Self::Found => f.write_str("found"),
        }
    }
}

struct WatcherInner {
    target: String,
    document: Rc<dyn Document>,
    state: Cell<WatchState>,
    batches_seen: Cell<u64>,
    subscription: RefCell<Option<Subscription>>,
    on_found: RefCell<Option<Box<dyn FnOnce()>>>,
}

pub struct ElementWatcher {
    inner: Rc<WatcherInner>,
}

impl ElementWatcher {
    /// Start watching for `target`.
    ///
    /// If the element is already present, `on_found` runs before this
    /// returns and the mutation feed is never subscribed to.
    pub fn start(
        target: impl Into<String>,
        document: Rc<dyn Document>,
        feed: &dyn MutationFeed,
        on_found: impl FnOnce() + 'static,
    ) -> Self {
        let inner = Rc::new(WatcherInner {
            target: target.into(),
            document,
            state: Cell::new(WatchState::Searching),
            batches_seen: Cell::new(0),
            subscription: RefCell::new(None),
            on_found: RefCell::new(Some(Box::new(on_found))),
        });

        if inner.document.contains_element(&inner.target) {
            debug!(element = %inner.target, "element present at start");
            inner.transition_to_found();
            return Self { inner };
        }

        let weak = Rc::downgrade(&inner);
        let subscription = feed.subscribe_mutations(Box::new(move |batch: &MutationBatch| {
            if let Some(inner) = weak.upgrade() {
                inner.on_batch(batch);
            }
        }));
        *inner.subscription.borrow_mut() = Some(subscription);

        // A feed that delivers while subscribing may already have found it.
        if inner.state.get() == WatchState::Found {
            inner.cancel_subscription();
        }

        debug!(element = %inner.target, "watching for element");
        Self { inner }
    }

    pub fn state(&self) -> WatchState {
        self.inner.state.get()
    }

    pub fn target(&self) -> &str {
        &self.inner.target
    }

    /// Mutation batches processed while searching.
    pub fn batches_seen(&self) -> u64 {
        self.inner.batches_seen.get()
    }

    /// Whether the mutation subscription is still live.
    pub fn is_subscribed(&self) -> bool {
        self.inner
            .subscription
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }
}

impl WatcherInner {
    fn on_batch(&self, batch: &MutationBatch) {
        if self.state.get() == WatchState::Found {
            return;
        }
        let seen = self.batches_seen.get() + 1;
        self.batches_seen.set(seen);
        trace!(element = %self.target, batch = seen, records = batch.len(), "mutation batch");

        if self.document.contains_element(&self.target) {
            debug!(element = %self.target, batches = seen, "element found");
            self.transition_to_found();
        }
    }

    fn transition_to_found(&self) {
        self.state.set(WatchState::Found);
        self.cancel_subscription();
        let on_found = self.on_found.borrow_mut().take();
        if let Some(on_found) = on_found {
            on_found();
        }
    }

    fn cancel_subscription(&self) {
        let subscription = self.subscription.borrow_mut().take();
        if let Some(mut subscription) = subscription {
            subscription.cancel();
        }
    }
}
