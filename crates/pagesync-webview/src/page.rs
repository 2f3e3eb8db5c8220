//! The capability traits implemented over a live WebView document.
//!
//! The page script reports a [`DomSnapshot`] with every feed event and the
//! page mirrors the latest one, so `Document` queries are answered from the
//! most recent geometry the page has reported. Subscribing turns the
//! matching feed on in the page; cancelling the last subscriber turns it off.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pagesync_common::{ScrollToOptions, ViewportDimensions};
use pagesync_core::{
    Document, Listeners, MutationBatch, MutationFeed, MutationRecord, ScrollFeed, Scroller,
    SizeFeed, Subscription,
};
use tracing::{trace, warn};

use crate::ipc::{self, ScriptSink};
use crate::snapshot::DomSnapshot;

pub struct WebViewPage {
    sink: Rc<dyn ScriptSink>,
    mirror: RefCell<DomSnapshot>,
    mutations: Listeners<MutationBatch>,
    sizes: RefCell<HashMap<String, Listeners<()>>>,
    scrolls: Listeners<()>,
}

impl WebViewPage {
    pub fn new(sink: Rc<dyn ScriptSink>) -> Self {
        Self {
            sink,
            mirror: RefCell::new(DomSnapshot::default()),
            mutations: Listeners::new(),
            sizes: RefCell::new(HashMap::new()),
            scrolls: Listeners::new(),
        }
    }

    pub fn apply_snapshot(&self, snapshot: DomSnapshot) {
        *self.mirror.borrow_mut() = snapshot;
    }

    pub fn deliver_mutations(&self, records: Vec<MutationRecord>, snapshot: DomSnapshot) {
        self.apply_snapshot(snapshot);
        let batch = MutationBatch { records };
        let notified = self.mutations.dispatch(&batch);
        trace!(records = batch.len(), notified, "mutation batch from page");
    }

    pub fn deliver_resize(&self, id: &str, snapshot: DomSnapshot) {
        self.apply_snapshot(snapshot);
        let listeners = self.sizes.borrow().get(id).cloned();
        if let Some(listeners) = listeners {
            listeners.dispatch(&());
        }
    }

    pub fn deliver_scroll(&self, snapshot: DomSnapshot) {
        self.apply_snapshot(snapshot);
        self.scrolls.dispatch(&());
    }

    fn run(&self, script: &str) {
        if let Err(e) = self.sink.evaluate(script) {
            warn!(error = %e, "failed to evaluate page script");
        }
    }

    /// Wrap `inner` so that cancelling the last listener of `listeners`
    /// evaluates `off_script`.
    fn feed_subscription<T: 'static>(
        &self,
        mut inner: Subscription,
        listeners: Listeners<T>,
        off_script: String,
    ) -> Subscription {
        let sink = Rc::clone(&self.sink);
        Subscription::new(move || {
            inner.cancel();
            if listeners.is_empty() {
                if let Err(e) = sink.evaluate(&off_script) {
                    warn!(error = %e, "failed to switch page feed off");
                }
            }
        })
    }
}

impl Document for WebViewPage {
    fn element_size(&self, id: &str) -> Option<ViewportDimensions> {
        self.mirror.borrow().element(id)
    }

    fn window_inner_size(&self) -> ViewportDimensions {
        self.mirror.borrow().window
    }
}

impl MutationFeed for WebViewPage {
    fn subscribe_mutations(&self, callback: Box<dyn FnMut(&MutationBatch)>) -> Subscription {
        let first = self.mutations.is_empty();
        let inner = self.mutations.add(callback);
        if first {
            self.run(&ipc::js_set_mutations(true));
        }
        self.feed_subscription(inner, self.mutations.clone(), ipc::js_set_mutations(false))
    }
}

impl SizeFeed for WebViewPage {
    /// The first callback arrives with the `ResizeObserver`'s initial entry.
    fn observe_size(&self, element_id: &str, mut callback: Box<dyn FnMut()>) -> Subscription {
        let listeners = self
            .sizes
            .borrow_mut()
            .entry(element_id.to_string())
            .or_default()
            .clone();
        let first = listeners.is_empty();
        let inner = listeners.add(Box::new(move |_: &()| callback()));
        if first {
            self.run(&ipc::js_observe_size(element_id, true));
        }
        self.feed_subscription(inner, listeners, ipc::js_observe_size(element_id, false))
    }
}

impl ScrollFeed for WebViewPage {
    fn listen_scroll(&self, mut callback: Box<dyn FnMut()>) -> Subscription {
        let first = self.scrolls.is_empty();
        let inner = self.scrolls.add(Box::new(move |_: &()| callback()));
        if first {
            self.run(&ipc::js_set_scroll(true));
        }
        self.feed_subscription(inner, self.scrolls.clone(), ipc::js_set_scroll(false))
    }
}

impl Scroller for WebViewPage {
    fn scroll_to(&self, options: ScrollToOptions) {
        self.run(&ipc::js_scroll_to(&options));
    }
}
