//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: one window, one WebView filling it, one page session whose
//! timers are advanced from the loop clock.

mod core;
mod event_handler;
mod init;
mod polling;
mod types;

pub use self::core::PageSyncApp;
