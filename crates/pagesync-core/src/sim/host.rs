use std::cell::RefCell;
use std::rc::Rc;

use pagesync_common::OutboundMessage;

use crate::gate::HostApp;
use crate::platform::Timers;

/// An outbound message together with the loop time it was sent at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub at_ms: u64,
    pub message: OutboundMessage,
}

/// A host application that only records what it is sent.
#[derive(Default)]
pub struct RecordingHost {
    clock: Option<Rc<dyn Timers>>,
    sent: RefCell<Vec<SentMessage>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every message with `clock`'s current time.
    pub fn with_clock(clock: Rc<dyn Timers>) -> Self {
        Self {
            clock: Some(clock),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.borrow().iter().map(|s| s.message.clone()).collect()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.borrow().clone()
    }

    /// Messages sent to `port`.
    pub fn count(&self, port: &str) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|s| s.message.port() == port)
            .count()
    }
}

impl HostApp for RecordingHost {
    fn send(&self, message: &OutboundMessage) {
        let at_ms = self.clock.as_ref().map_or(0, |clock| clock.now_ms());
        self.sent.borrow_mut().push(SentMessage {
            at_ms,
            message: message.clone(),
        });
    }
}
