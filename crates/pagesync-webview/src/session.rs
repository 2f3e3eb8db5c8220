//! Per-document bootstrap: installs the sync pipeline when the page is
//! ready, boots the host application and routes page events into it.

use std::rc::Rc;

use pagesync_common::{InboundMessage, PageSyncError, ProtocolError, Result};
use pagesync_core::{SyncContext, SyncSettings, Timers, ViewportSync, WatchState};
use tracing::{debug, info};

use crate::host::PageHost;
use crate::ipc::{self, IpcMessage, ScriptSink};
use crate::page::WebViewPage;
use crate::page_event::PageEvent;
use crate::snapshot::DomSnapshot;

pub struct PageSession {
    settings: SyncSettings,
    sink: Rc<dyn ScriptSink>,
    timers: Rc<dyn Timers>,
    page: Rc<WebViewPage>,
    sync: Option<ViewportSync>,
}

impl PageSession {
    pub fn new(settings: SyncSettings, sink: Rc<dyn ScriptSink>, timers: Rc<dyn Timers>) -> Self {
        let page = Rc::new(WebViewPage::new(Rc::clone(&sink)));
        Self {
            settings,
            sink,
            timers,
            page,
            sync: None,
        }
    }

    /// Script to install in every document before it runs.
    pub fn init_script(&self) -> String {
        ipc::page_init_script(&self.settings.target_id)
    }

    /// `None` until the page has reported ready.
    pub fn state(&self) -> Option<WatchState> {
        self.sync.as_ref().map(ViewportSync::state)
    }

    pub fn host_attached(&self) -> bool {
        self.sync
            .as_ref()
            .is_some_and(|sync| sync.context().gate.is_set())
    }

    /// A new document is loading. Everything tied to the old one is dropped;
    /// timers it armed find nothing to notify when they fire.
    pub fn reset(&mut self) {
        if self.sync.take().is_some() {
            debug!("page session reset");
        }
        self.page = Rc::new(WebViewPage::new(Rc::clone(&self.sink)));
    }

    /// Decode and handle one raw IPC body.
    pub fn handle_ipc(&mut self, body: &str) -> Result<()> {
        let message = IpcMessage::from_json(body)
            .ok_or_else(|| ProtocolError::Malformed(format!("{} byte IPC body", body.len())))?;
        let event = PageEvent::from_ipc(message)?;
        self.handle_event(event)
    }

    pub fn handle_event(&mut self, event: PageEvent) -> Result<()> {
        debug!(kind = event.kind(), "page event");
        match event {
            PageEvent::PageReady { snapshot } => self.on_page_ready(snapshot),
            PageEvent::Mutations { records, snapshot } => {
                self.page.deliver_mutations(records, snapshot);
                Ok(())
            }
            PageEvent::Resize { id, snapshot } => {
                self.page.deliver_resize(&id, snapshot);
                Ok(())
            }
            PageEvent::Scroll { snapshot } => {
                self.page.deliver_scroll(snapshot);
                Ok(())
            }
            PageEvent::AppReady => {
                let sync = self.running("app_ready")?;
                let host = Rc::new(PageHost::new(Rc::clone(&self.sink)));
                sync.context().attach_host(host)?;
                info!("host application ready");
                Ok(())
            }
            PageEvent::Port { port, payload } => {
                let message = InboundMessage::from_parts(&port, payload)?;
                self.running("port")?.context().bridge.handle_inbound(message);
                Ok(())
            }
        }
    }

    /// Watcher first, then the host application, as a page bootstrap would.
    fn on_page_ready(&mut self, snapshot: DomSnapshot) -> Result<()> {
        self.page.apply_snapshot(snapshot);
        if self.sync.is_some() {
            debug!("duplicate page_ready ignored");
            return Ok(());
        }

        let ctx = SyncContext::new(
            self.settings.clone(),
            Rc::clone(&self.page),
            Rc::clone(&self.timers),
        );
        let sync = ViewportSync::start(ctx, Rc::clone(&self.page));
        let flags = sync.context().boot_flags();
        info!(
            element = %self.settings.target_id,
            state = %sync.state(),
            window = %flags.window_size,
            "page ready, booting host application"
        );
        self.sync = Some(sync);
        self.sink.evaluate(&ipc::js_boot(&flags))
    }

    fn running(&self, kind: &str) -> Result<&ViewportSync> {
        self.sync
            .as_ref()
            .ok_or_else(|| PageSyncError::WebView(format!("{kind} received before page_ready")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::tests::{snapshot, RecordingSink};
    use pagesync_core::Scheduler;

    const ID: &str = "intro-full-viewport";

    fn session() -> (Rc<RecordingSink>, Rc<Scheduler>, PageSession) {
        let sink = Rc::new(RecordingSink::default());
        let scheduler = Rc::new(Scheduler::new());
        let session = PageSession::new(SyncSettings::default(), sink.clone(), scheduler.clone());
        (sink, scheduler, session)
    }

    fn ipc(kind: &str, payload: serde_json::Value) -> String {
        serde_json::json!({ "kind": kind, "payload": payload }).to_string()
    }

    fn snap_json(elements: &[(&str, u32, u32)]) -> serde_json::Value {
        serde_json::to_value(snapshot((1280, 800), elements)).unwrap()
    }

    #[test]
    fn boots_after_installing_watcher() {
        let (sink, _scheduler, mut session) = session();
        assert_eq!(session.state(), None);

        session
            .handle_ipc(&ipc("page_ready", serde_json::json!({ "snapshot": snap_json(&[]) })))
            .unwrap();

        assert_eq!(session.state(), Some(WatchState::Searching));
        let scripts = sink.take();
        assert_eq!(scripts[0], "window.pagesync.setMutations(true);");
        assert!(scripts[1].starts_with("window.pagesync.boot("));
        assert!(scripts[1].contains(r#""windowSize":{"width":1280,"height":800}"#));
    }

    #[test]
    fn full_round_trip() {
        let (sink, scheduler, mut session) = session();
        session
            .handle_ipc(&ipc("page_ready", serde_json::json!({ "snapshot": snap_json(&[]) })))
            .unwrap();
        session.handle_ipc(&ipc("app_ready", serde_json::json!({}))).unwrap();
        assert!(session.host_attached());
        sink.take();

        // Element appears.
        session
            .handle_ipc(&ipc(
                "mutations",
                serde_json::json!({
                    "records": [{ "kind": "added", "id": ID }],
                    "snapshot": snap_json(&[(ID, 1264, 800)]),
                }),
            ))
            .unwrap();
        assert_eq!(session.state(), Some(WatchState::Found));
        assert_eq!(
            sink.take(),
            vec![
                "window.pagesync.setMutations(false);".to_string(),
                r#"window.pagesync.observeSize("intro-full-viewport", true);"#.to_string(),
                "window.pagesync.setScroll(true);".to_string(),
            ]
        );

        // Initial ResizeObserver entry, then a burst.
        for width in [1264, 1200, 1100] {
            session
                .handle_ipc(&ipc(
                    "resize",
                    serde_json::json!({ "id": ID, "snapshot": snap_json(&[(ID, width, 800)]) }),
                ))
                .unwrap();
        }
        scheduler.advance_to(200);

        let scripts = sink.take();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].starts_with(r#"window.pagesync._deliver("receiveWindowSize", "#));
        assert!(scripts[0].contains(r#""width":1100"#));

        // Host asks for a smooth scroll.
        session
            .handle_ipc(&ipc(
                "port",
                serde_json::json!({
                    "port": "performSmoothScrollTo",
                    "payload": { "x": 100, "y": 200 },
                }),
            ))
            .unwrap();
        assert_eq!(
            sink.take(),
            vec![r#"window.pagesync.scrollTo({"top":200.0,"left":100.0,"behavior":"smooth"});"#]
        );
    }

    #[test]
    fn resize_without_element_reports_window_size() {
        let (sink, scheduler, mut session) = session();
        session
            .handle_ipc(&ipc(
                "page_ready",
                serde_json::json!({ "snapshot": snap_json(&[(ID, 1000, 700)]) }),
            ))
            .unwrap();
        session.handle_ipc(&ipc("app_ready", serde_json::json!({}))).unwrap();
        sink.take();

        // Element vanished before the page could attach its ResizeObserver.
        session
            .handle_ipc(&ipc(
                "resize",
                serde_json::json!({ "id": ID, "snapshot": snap_json(&[]) }),
            ))
            .unwrap();
        scheduler.advance_to(200);

        let scripts = sink.take();
        assert_eq!(scripts.len(), 1);
        let start = scripts[0].find('{').unwrap();
        let end = scripts[0].rfind(')').unwrap();
        let payload: serde_json::Value = serde_json::from_str(&scripts[0][start..end]).unwrap();
        assert_eq!(payload, serde_json::json!({ "width": 1280, "height": 800 }));
        assert!(scripts[0].starts_with(r#"window.pagesync._deliver("receiveWindowSize", "#));
    }

    #[test]
    fn messages_before_app_ready_are_dropped() {
        let (sink, scheduler, mut session) = session();
        session
            .handle_ipc(&ipc(
                "page_ready",
                serde_json::json!({ "snapshot": snap_json(&[(ID, 1000, 700)]) }),
            ))
            .unwrap();
        assert_eq!(session.state(), Some(WatchState::Found));

        session
            .handle_ipc(&ipc(
                "scroll",
                serde_json::json!({ "snapshot": snap_json(&[(ID, 1000, 700)]) }),
            ))
            .unwrap();
        sink.take();
        scheduler.advance_to(500);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn rejects_unknown_kinds_and_bad_ports() {
        let (_sink, _scheduler, mut session) = session();
        assert!(session.handle_ipc("garbage").is_err());
        assert!(session.handle_ipc(&ipc("eval", serde_json::json!("alert(1)"))).is_err());

        // Valid port message but nothing is running yet.
        let err = session
            .handle_ipc(&ipc(
                "port",
                serde_json::json!({
                    "port": "performSmoothScrollTo",
                    "payload": { "x": 0, "y": 0 },
                }),
            ))
            .unwrap_err();
        assert!(matches!(err, PageSyncError::WebView(_)));

        let err = session
            .handle_ipc(&ipc("port", serde_json::json!({ "port": "openDoor", "payload": {} })))
            .unwrap_err();
        assert!(matches!(err, PageSyncError::Protocol(ProtocolError::UnknownPort(_))));
    }

    #[test]
    fn second_app_ready_is_an_error() {
        let (_sink, _scheduler, mut session) = session();
        session
            .handle_ipc(&ipc("page_ready", serde_json::json!({ "snapshot": snap_json(&[]) })))
            .unwrap();
        session.handle_ipc(&ipc("app_ready", serde_json::json!({}))).unwrap();
        let err = session.handle_ipc(&ipc("app_ready", serde_json::json!({}))).unwrap_err();
        assert!(matches!(err, PageSyncError::Core(_)));
    }

    #[test]
    fn reset_drops_pending_notifications() {
        let (sink, scheduler, mut session) = session();
        session
            .handle_ipc(&ipc(
                "page_ready",
                serde_json::json!({ "snapshot": snap_json(&[(ID, 1000, 700)]) }),
            ))
            .unwrap();
        session.handle_ipc(&ipc("app_ready", serde_json::json!({}))).unwrap();
        session
            .handle_ipc(&ipc(
                "scroll",
                serde_json::json!({ "snapshot": snap_json(&[(ID, 1000, 700)]) }),
            ))
            .unwrap();
        sink.take();

        session.reset();
        scheduler.advance_to(1000);

        assert!(sink.take().is_empty());
        assert_eq!(session.state(), None);
    }
}
