//! Capability traits through which the core reaches the page.
//!
//! The core never touches a DOM directly. It queries a [`Document`],
//! subscribes to feeds that hand back a [`Subscription`] cancel handle,
//! calls a [`Scroller`] and arms [`Timers`]. Implementations live in
//! `sim` (in-memory) and in the WebView adapter crate.

use std::fmt;
use std::time::Duration;

use pagesync_common::{ScrollToOptions, ViewportDimensions};

/// Element lookup and window geometry.
pub trait Document {
    /// Content-box size of the element with `id`, or `None` if it is not in
    /// the document.
    fn element_size(&self, id: &str) -> Option<ViewportDimensions>;

    /// `window.innerWidth` / `window.innerHeight`.
    fn window_inner_size(&self) -> ViewportDimensions;

    fn contains_element(&self, id: &str) -> bool {
        self.element_size(id).is_some()
    }
}

/// Document-wide structural mutation feed (subtree, child list only).
pub trait MutationFeed {
    fn subscribe_mutations(&self, callback: Box<dyn FnMut(&MutationBatch)>) -> Subscription;
}

/// Size observation of a single element.
///
/// Implementations invoke `callback` once upon attaching (`ResizeObserver`
/// semantics: the in-memory page does it synchronously, a WebView when the
/// observer's first entry arrives), then on every size change.
pub trait SizeFeed {
    fn observe_size(&self, element_id: &str, callback: Box<dyn FnMut()>) -> Subscription;
}

/// Passive document-level scroll events.
pub trait ScrollFeed {
    fn listen_scroll(&self, callback: Box<dyn FnMut()>) -> Subscription;
}

/// The platform scroll primitive (`window.scrollTo(options)`).
pub trait Scroller {
    fn scroll_to(&self, options: ScrollToOptions);
}

/// One-shot timers on the event loop.
pub trait Timers {
    /// Run `task` no earlier than `delay` from now, in a later turn than the
    /// current one.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Current event-loop time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Everything a page provides to the core except timers.
pub trait Platform: Document + MutationFeed + SizeFeed + ScrollFeed + Scroller {}

impl<T> Platform for T where T: Document + MutationFeed + SizeFeed + ScrollFeed + Scroller {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// `id` attribute of the inserted/removed element, when it has one.
    pub element_id: Option<String>,
}

/// One delivery of the mutation feed. Consumers re-query the [`Document`]
/// rather than trusting the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    pub records: Vec<MutationRecord>,
}

impl MutationBatch {
    pub fn added(id: impl Into<String>) -> Self {
        Self {
            records: vec![MutationRecord {
                kind: MutationKind::Added,
                element_id: Some(id.into()),
            }],
        }
    }

    pub fn removed(id: impl Into<String>) -> Self {
        Self {
            records: vec![MutationRecord {
                kind: MutationKind::Removed,
                element_id: Some(id.into()),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cancel handle returned by every feed.
///
/// Dropping a `Subscription` does NOT cancel it: size and scroll
/// subscriptions live for the rest of the page session, and only an explicit
/// [`cancel`](Subscription::cancel) stops delivery.
#[must_use = "keep the handle to be able to cancel the subscription"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Stop delivery. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn cancel_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let mut sub = Subscription::new(move || c.set(c.get() + 1));
        assert!(sub.is_active());

        sub.cancel();
        sub.cancel();
        assert_eq!(calls.get(), 1);
        assert!(!sub.is_active());
    }

    #[test]
    fn drop_does_not_cancel() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let sub = Subscription::new(move || c.set(c.get() + 1));
        drop(sub);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn inert_subscription_is_inactive() {
        let mut sub = Subscription::inert();
        assert!(!sub.is_active());
        sub.cancel();
    }

    #[test]
    fn batch_constructors() {
        let batch = MutationBatch::added("hero");
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.records[0].kind, MutationKind::Added);
        assert_eq!(batch.records[0].element_id.as_deref(), Some("hero"));
        assert!(MutationBatch::default().is_empty());
        assert_eq!(MutationBatch::removed("x").records[0].kind, MutationKind::Removed);
    }
}
