//! Page/host synchronization core.
//!
//! Waits for a dynamically created element without polling, then reports
//! its size and the page's scroll activity to the host application through
//! per-kind throttles, dropping anything issued before the host exists.
//! Scroll-to commands from the host go straight to the scroll primitive.
//!
//! Everything here is single-threaded: shared state lives in `Rc`/`RefCell`
//! and every callback runs to completion before the next one starts. The
//! platform (DOM, observers, timers) is reached only through the capability
//! traits in [`platform`], so the same logic drives a real WebView and the
//! in-memory [`sim::SimPage`].

pub mod bridge;
pub mod context;
pub mod dimensions;
pub mod gate;
pub mod listeners;
pub mod platform;
pub mod scheduler;
pub mod sim;
pub mod sync;
pub mod throttle;
pub mod watcher;

pub use bridge::PortBridge;
pub use context::{SyncContext, SyncSettings};
pub use dimensions::DimensionSource;
pub use gate::{AppGate, HostApp};
pub use listeners::Listeners;
pub use platform::{
    Document, MutationBatch, MutationFeed, MutationKind, MutationRecord, Platform, ScrollFeed,
    Scroller, SizeFeed, Subscription, TimerId, Timers,
};
pub use scheduler::Scheduler;
pub use sync::{ViewportSync, DIMENSIONS_KEY, SCROLL_KEY};
pub use throttle::Throttler;
pub use watcher::{ElementWatcher, WatchState};
