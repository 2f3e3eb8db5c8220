//! Constants for the application event loop.

use std::time::Duration;

/// How often WebView events are drained when nothing else wakes the loop.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);
