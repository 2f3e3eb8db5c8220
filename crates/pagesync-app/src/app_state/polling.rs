//! Event draining and timer-driven wake-ups.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use pagesync_webview::{PageLoadState, WebViewEvent};

use super::core::PageSyncApp;
use super::types::POLL_INTERVAL;

impl PageSyncApp {
    /// Run due timers, drain WebView events, and sleep until whichever comes
    /// first: the next armed timer or the next poll.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        self.scheduler.advance_to(self.elapsed_ms());

        let now = Instant::now();
        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
        }

        let next_poll = self.last_poll + POLL_INTERVAL;
        let wake = match self.scheduler.next_due_ms() {
            Some(due) => next_poll.min(self.instant_at(due)),
            None => next_poll,
        };
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    fn poll_webview_events(&mut self) {
        for event in self.webviews.drain_events() {
            match event {
                WebViewEvent::PageLoad {
                    state: PageLoadState::Started,
                    url,
                } => {
                    tracing::debug!(url = %url, "navigation started");
                    if let Some(webview) = &self.webview {
                        webview.set_current_url(url);
                    }
                    if let Some(session) = self.session.as_mut() {
                        session.reset();
                    }
                }
                WebViewEvent::PageLoad {
                    state: PageLoadState::Finished,
                    url,
                } => {
                    tracing::debug!(url = %url, "page loaded");
                }
                WebViewEvent::IpcMessage { body } => {
                    let Some(session) = self.session.as_mut() else {
                        continue;
                    };
                    if let Err(e) = session.handle_ipc(&body) {
                        tracing::warn!(error = %e, "page message rejected");
                    }
                }
                WebViewEvent::TitleChanged { title } => {
                    if let Some(window) = &self.window {
                        window.set_title(&window_title(&self.config.window.title, &title));
                    }
                }
            }
        }
    }
}

/// Window title for a page title; the configured title alone while the page
/// has none.
fn window_title(base: &str, page_title: &str) -> String {
    let page_title = page_title.trim();
    if page_title.is_empty() {
        base.to_string()
    } else {
        format!("{base} - {page_title}")
    }
}
