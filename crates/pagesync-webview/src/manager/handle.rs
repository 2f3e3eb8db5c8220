use std::cell::RefCell;

use pagesync_common::PageSyncError;
use wry::WebView;

use crate::ipc::ScriptSink;

/// Handle to the managed WebView instance.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    /// Current URL (best-effort tracking).
    pub(super) current_url: RefCell<String>,
}

impl WebViewHandle {
    pub fn current_url(&self) -> String {
        self.current_url.borrow().clone()
    }

    /// Record the URL of a navigation that started.
    pub fn set_current_url(&self, url: String) {
        *self.current_url.borrow_mut() = url;
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }
}

impl ScriptSink for WebViewHandle {
    fn evaluate(&self, script: &str) -> Result<(), PageSyncError> {
        self.evaluate_script(script)
            .map_err(|e| PageSyncError::WebView(e.to_string()))
    }
}
