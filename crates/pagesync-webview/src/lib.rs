//! WebView adapter for pagesync.
//!
//! Wraps the `wry` crate to provide:
//! - An injected page script (`window.pagesync`) exposing mutation, size
//!   and scroll feeds, the boot hook and the port relay
//! - IPC decoding with a kind allowlist (JS -> Rust)
//! - `WebViewPage`, the capability traits implemented over a mirrored DOM
//!   snapshot, and `PageHost`, the host application reached through the page
//! - `PageSession`, which boots the sync pipeline for each loaded document
//! - WebView creation and event collection for the main event loop

pub mod content;
pub mod events;
pub mod host;
pub mod ipc;
pub mod manager;
pub mod page;
pub mod page_event;
pub mod session;
pub mod snapshot;

pub use events::{PageLoadState, WebViewEvent};
pub use host::PageHost;
pub use ipc::{IpcMessage, ScriptSink};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
pub use page::WebViewPage;
pub use page_event::PageEvent;
pub use session::PageSession;
pub use snapshot::DomSnapshot;
