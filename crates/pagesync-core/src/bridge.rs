//! The port boundary between the page and the host application.

use std::rc::Rc;

use pagesync_common::{
    InboundMessage, OutboundMessage, ProtocolError, ScrollCoords, ScrollToOptions,
    ViewportDimensions,
};
use tracing::{debug, trace};

use crate::gate::AppGate;
use crate::platform::Scroller;

/// Outbound notifications go through the [`AppGate`]; inbound scroll
/// commands go straight to the scroll primitive.
#[derive(Clone)]
pub struct PortBridge {
    gate: AppGate,
    scroller: Rc<dyn Scroller>,
}

impl PortBridge {
    pub fn new(gate: AppGate, scroller: Rc<dyn Scroller>) -> Self {
        Self { gate, scroller }
    }

    pub fn send_dimensions(&self, dimensions: ViewportDimensions) {
        self.send(OutboundMessage::ReceiveWindowSize(dimensions));
    }

    pub fn send_scroll_notification(&self) {
        self.send(OutboundMessage::NotifyScrolling {});
    }

    /// Smooth-scroll the document to absolute `coords`. Not gated: the
    /// command comes from the host app, so it exists.
    pub fn on_smooth_scroll_to(&self, coords: ScrollCoords) {
        debug!(x = coords.x, y = coords.y, "smooth scroll requested");
        self.scroller.scroll_to(ScrollToOptions::smooth_to(coords));
    }

    pub fn handle_inbound(&self, message: InboundMessage) {
        match message {
            InboundMessage::PerformSmoothScrollTo(coords) => self.on_smooth_scroll_to(coords),
        }
    }

    /// Decode a raw `{"port", "payload"}` envelope and dispatch it. Nothing
    /// happens when decoding fails.
    pub fn handle_inbound_json(&self, raw: &str) -> Result<(), ProtocolError> {
        let message = InboundMessage::from_json(raw)?;
        self.handle_inbound(message);
        Ok(())
    }

    pub fn gate(&self) -> &AppGate {
        &self.gate
    }

    fn send(&self, message: OutboundMessage) {
        let sent = self.gate.with_app(|app| app.send(&message));
        if sent.is_none() {
            trace!(port = message.port(), "host app not set, message dropped");
        }
    }
}
