use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use pagesync_common::{ScrollCoords, ScrollToOptions, ViewportDimensions};
use tracing::trace;

use crate::listeners::Listeners;
use crate::platform::{
    Document, MutationBatch, MutationFeed, MutationKind, MutationRecord, ScrollFeed, Scroller,
    SizeFeed, Subscription,
};

/// In-memory document.
///
/// Every change is delivered to the relevant feed synchronously, inside the
/// call that made it, the way a single DOM task would observe it once the
/// platform queued the observer callbacks.
pub struct SimPage {
    window: Cell<ViewportDimensions>,
    elements: RefCell<BTreeMap<String, ViewportDimensions>>,
    scroll_position: Cell<ScrollCoords>,
    mutations: Listeners<MutationBatch>,
    size_observers: RefCell<HashMap<String, Listeners<()>>>,
    scroll_listeners: Listeners<()>,
    scroll_calls: RefCell<Vec<ScrollToOptions>>,
}

impl SimPage {
    pub fn new(window: ViewportDimensions) -> Self {
        Self {
            window: Cell::new(window),
            elements: RefCell::new(BTreeMap::new()),
            scroll_position: Cell::new(ScrollCoords::default()),
            mutations: Listeners::new(),
            size_observers: RefCell::new(HashMap::new()),
            scroll_listeners: Listeners::new(),
            scroll_calls: RefCell::new(Vec::new()),
        }
    }

    /// Insert (or replace) an element and emit one `Added` batch.
    pub fn insert_element(&self, id: &str, size: ViewportDimensions) {
        self.elements.borrow_mut().insert(id.to_string(), size);
        trace!(element = id, %size, "sim insert");
        self.emit_mutations(MutationBatch::added(id));
    }

    /// Remove an element. A batch is emitted only if it existed.
    pub fn remove_element(&self, id: &str) -> bool {
        let existed = self.elements.borrow_mut().remove(id).is_some();
        if existed {
            trace!(element = id, "sim remove");
            self.emit_mutations(MutationBatch::removed(id));
        }
        existed
    }

    /// Change an element's content box and notify its size observers.
    /// Unknown ids and unchanged sizes are ignored.
    pub fn resize_element(&self, id: &str, size: ViewportDimensions) -> bool {
        {
            let mut elements = self.elements.borrow_mut();
            match elements.get_mut(id) {
                Some(current) if *current != size => *current = size,
                _ => return false,
            }
        }
        trace!(element = id, %size, "sim resize");
        self.notify_size(id);
        true
    }

    /// Change the window's inner size. Element sizes are independent of it.
    pub fn resize_window(&self, size: ViewportDimensions) {
        self.window.set(size);
    }

    /// A user-initiated scroll: moves the viewport and fires one scroll event.
    pub fn scroll_by_user(&self, position: ScrollCoords) {
        self.scroll_position.set(position);
        self.scroll_listeners.dispatch(&());
    }

    /// Deliver an arbitrary batch to mutation subscribers.
    pub fn emit_mutations(&self, batch: MutationBatch) {
        self.mutations.dispatch(&batch);
    }

    /// A structural change that involves no element with an id.
    pub fn emit_anonymous_mutation(&self) {
        self.emit_mutations(MutationBatch {
            records: vec![MutationRecord {
                kind: MutationKind::Added,
                element_id: None,
            }],
        });
    }

    pub fn mutation_subscribers(&self) -> usize {
        self.mutations.len()
    }

    pub fn size_observers(&self, id: &str) -> usize {
        self.size_observers
            .borrow()
            .get(id)
            .map_or(0, Listeners::len)
    }

    pub fn scroll_listeners(&self) -> usize {
        self.scroll_listeners.len()
    }

    pub fn scroll_position(&self) -> ScrollCoords {
        self.scroll_position.get()
    }

    /// Every call made to the scroll primitive, oldest first.
    pub fn scroll_calls(&self) -> Vec<ScrollToOptions> {
        self.scroll_calls.borrow().clone()
    }

    fn notify_size(&self, id: &str) {
        let listeners = self.size_observers.borrow().get(id).cloned();
        if let Some(listeners) = listeners {
            listeners.dispatch(&());
        }
    }
}

impl Document for SimPage {
    fn element_size(&self, id: &str) -> Option<ViewportDimensions> {
        self.elements.borrow().get(id).copied()
    }

    fn window_inner_size(&self) -> ViewportDimensions {
        self.window.get()
    }
}

impl MutationFeed for SimPage {
    fn subscribe_mutations(&self, callback: Box<dyn FnMut(&MutationBatch)>) -> Subscription {
        self.mutations.add(callback)
    }
}

impl SizeFeed for SimPage {
    fn observe_size(&self, element_id: &str, mut callback: Box<dyn FnMut()>) -> Subscription {
        let listeners = self
            .size_observers
            .borrow_mut()
            .entry(element_id.to_string())
            .or_default()
            .clone();
        listeners.add_and_notify(Box::new(move |_: &()| callback()), &())
    }
}

impl ScrollFeed for SimPage {
    fn listen_scroll(&self, mut callback: Box<dyn FnMut()>) -> Subscription {
        self.scroll_listeners.add(Box::new(move |_: &()| callback()))
    }
}

impl Scroller for SimPage {
    /// Records the call and jumps to the destination. A change of position
    /// fires one scroll event, as the end of the animation would.
    fn scroll_to(&self, options: ScrollToOptions) {
        self.scroll_calls.borrow_mut().push(options);
        let destination = ScrollCoords::new(options.left, options.top);
        if destination != self.scroll_position.get() {
            self.scroll_by_user(destination);
        }
    }
}
