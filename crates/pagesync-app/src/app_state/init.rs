//! Window, WebView and page session creation.

use std::rc::Rc;
use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use pagesync_core::Timers;
use pagesync_webview::manager::fill_bounds;
use pagesync_webview::{content, ipc, PageSession, ScriptSink, WebViewConfig};

use super::core::PageSyncApp;

impl PageSyncApp {
    /// Create the window, the WebView inside it and the page session.
    /// Returns `false` when any of them cannot be created.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let webview_config = self.webview_config();
        let size = window.inner_size();
        let handle = match self.webviews.create(
            window.as_ref(),
            fill_bounds(size.width, size.height),
            &webview_config,
        ) {
            Ok(handle) => Rc::new(handle),
            Err(e) => {
                tracing::error!("Failed to create WebView: {e}");
                return false;
            }
        };

        tracing::info!(
            url = %handle.current_url(),
            element = %self.settings.target_id,
            width = size.width,
            height = size.height,
            "window ready"
        );

        let sink: Rc<dyn ScriptSink> = handle.clone();
        let timers: Rc<dyn Timers> = self.scheduler.clone();
        self.session = Some(PageSession::new(self.settings.clone(), sink, timers));
        self.webview = Some(handle);
        self.window = Some(window);
        true
    }

    fn webview_config(&self) -> WebViewConfig {
        let window = &self.config.window;
        let mut config = match &window.url {
            Some(url) => WebViewConfig::with_url(url.clone()),
            None => WebViewConfig::with_html(content::demo_page()),
        };
        config.init_script = ipc::page_init_script(&self.settings.target_id);
        config.devtools = config.devtools || window.devtools;
        config
    }
}
