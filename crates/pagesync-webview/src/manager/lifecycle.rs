use std::cell::RefCell;
use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

const EMPTY_PAGE: &str = "<html><body></body></html>";

impl WebViewManager {
    /// Create the WebView as a child of the given window, positioned at
    /// `bounds`. `config.init_script` runs in every document before the
    /// page's own scripts.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: &WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = Arc::clone(&self.events);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_initialization_script(&config.init_script);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events));
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events));
        builder = Self::attach_title_handler(builder, events);

        builder = match (&config.url, &config.html) {
            (Some(url), _) => builder.with_url(url),
            (None, Some(html)) => builder.with_html(html),
            (None, None) => builder.with_html(EMPTY_PAGE),
        };

        let webview = builder.build_as_child(window)?;
        let initial_url = config.initial_url().to_string();

        debug!(url = %initial_url, "WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: RefCell::new(initial_url),
        })
    }
}

/// Bounds covering the whole client area of a window of the given
/// physical size.
pub fn fill_bounds(width: u32, height: u32) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(width, height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_bounds_starts_at_origin() {
        let rect = fill_bounds(1280, 800);
        assert_eq!(
            rect.position,
            wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0))
        );
        assert_eq!(
            rect.size,
            wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(1280, 800))
        );
    }
}
