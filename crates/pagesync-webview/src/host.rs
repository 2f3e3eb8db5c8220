use std::rc::Rc;

use pagesync_common::OutboundMessage;
use pagesync_core::HostApp;
use tracing::{trace, warn};

use crate::ipc::{self, ScriptSink};

/// The host application living in the page, reached through
/// `window.pagesync._deliver`.
pub struct PageHost {
    sink: Rc<dyn ScriptSink>,
}

impl PageHost {
    pub fn new(sink: Rc<dyn ScriptSink>) -> Self {
        Self { sink }
    }
}

impl HostApp for PageHost {
    fn send(&self, message: &OutboundMessage) {
        trace!(port = message.port(), "delivering to host app");
        if let Err(e) = self.sink.evaluate(&ipc::js_deliver(message)) {
            warn!(port = message.port(), error = %e, "failed to deliver port message");
        }
    }
}
