//! `PageSyncApp` struct definition and lifecycle helpers.

use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::window::Window;

use pagesync_config::PageSyncConfig;
use pagesync_core::{Scheduler, SyncSettings};
use pagesync_webview::{PageSession, WebViewHandle, WebViewManager};

pub struct PageSyncApp {
    pub(super) config: PageSyncConfig,
    pub(super) settings: SyncSettings,
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: WebViewManager,
    pub(super) webview: Option<Rc<WebViewHandle>>,
    pub(super) session: Option<PageSession>,
    /// Timers armed by the sync pipeline; its clock is milliseconds since
    /// `started`.
    pub(super) scheduler: Rc<Scheduler>,
    pub(super) started: Instant,
    pub(super) last_poll: Instant,
    pub(super) failed: bool,
}

impl PageSyncApp {
    pub fn new(config: PageSyncConfig) -> Self {
        let settings = SyncSettings::from_config(&config);
        let now = Instant::now();
        Self {
            config,
            settings,
            window: None,
            webviews: WebViewManager::new(),
            webview: None,
            session: None,
            scheduler: Rc::new(Scheduler::new()),
            started: now,
            last_poll: now,
            failed: false,
        }
    }

    /// Whether startup failed and the loop exited early.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Loop time on the scheduler's clock.
    pub(super) fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Wall-clock instant of a scheduler time.
    pub(super) fn instant_at(&self, ms: u64) -> Instant {
        self.started + Duration::from_millis(ms)
    }

    /// Keep the WebView covering the whole client area.
    pub(super) fn sync_webview_bounds(&self) {
        let (Some(window), Some(webview)) = (&self.window, &self.webview) else {
            return;
        };
        let size = window.inner_size();
        if let Err(e) = webview.set_bounds(pagesync_webview::manager::fill_bounds(
            size.width,
            size.height,
        )) {
            tracing::warn!(error = %e, "failed to resize WebView");
        }
    }

    pub(super) fn shutdown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset();
        }
        self.session = None;
        self.webview = None;
        tracing::info!(pending_timers = self.scheduler.pending(), "shut down");
    }
}
