//! WebView lifecycle management.
//!
//! `WebViewManager` creates the `wry::WebView` and collects its events for
//! the main event loop. Handlers run on the WebView's callback thread and
//! only push into the shared queue.

use std::sync::{Arc, Mutex};

use crate::events::WebViewEvent;

mod handle;
mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use lifecycle::fill_bounds;
pub use types::WebViewConfig;

pub struct WebViewManager {
    /// Event sink: events are pushed here for the main event loop to consume.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Drain all pending events, oldest first.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_events_in_order_and_empties_queue() {
        let manager = WebViewManager::new();
        {
            let mut events = manager.events.lock().unwrap();
            events.push(WebViewEvent::IpcMessage {
                body: "{}".into(),
            });
            events.push(WebViewEvent::TitleChanged {
                title: "demo".into(),
            });
        }

        let drained = manager.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], WebViewEvent::IpcMessage { .. }));
        assert!(manager.drain_events().is_empty());
    }
}
