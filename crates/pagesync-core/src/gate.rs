//! Deferred reference to the host application.

use std::cell::OnceCell;
use std::rc::Rc;

use pagesync_common::{CoreError, OutboundMessage};
use tracing::debug;

/// The host application as seen from the page: a set of outbound ports.
pub trait HostApp {
    /// Deliver `message` to the port it names. Fire-and-forget.
    fn send(&self, message: &OutboundMessage);
}

/// Holds the host application once it has been constructed.
///
/// Calls issued before [`set_app`](AppGate::set_app) are dropped, not
/// queued. The handle is set at most once and never cleared.
#[derive(Clone, Default)]
pub struct AppGate {
    app: Rc<OnceCell<Rc<dyn HostApp>>>,
}

impl AppGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_app(&self, app: Rc<dyn HostApp>) -> Result<(), CoreError> {
        self.app.set(app).map_err(|_| CoreError::AppAlreadySet)?;
        debug!("host application attached");
        Ok(())
    }

    /// Run `continuation` against the host app if it exists.
    pub fn with_app<R>(&self, continuation: impl FnOnce(&dyn HostApp) -> R) -> Option<R> {
        self.app.get().map(|app| continuation(app.as_ref()))
    }

    pub fn is_set(&self) -> bool {
        self.app.get().is_some()
    }
}
