//! In-memory page, recording host and scripted scenario replay.
//!
//! Used by unit tests and by `pagesync simulate` to exercise the full sync
//! pipeline without a browser engine.

mod host;
mod page;
mod scenario;

pub use host::{RecordingHost, SentMessage};
pub use page::SimPage;
pub use scenario::{Scenario, Step, StepAction, Transcript, TranscriptEntry};
