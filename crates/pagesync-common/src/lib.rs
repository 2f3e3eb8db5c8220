//! Shared types for pagesync: dimensions, scroll coordinates, boot flags,
//! the tagged port messages exchanged with the host application, and the
//! error types used across the workspace.

pub mod errors;
pub mod messages;
pub mod types;

pub use errors::{ConfigError, CoreError, PageSyncError, ProtocolError};
pub use messages::{InboundMessage, OutboundMessage};
pub use types::{BootFlags, ScrollBehavior, ScrollCoords, ScrollToOptions, ViewportDimensions};

pub type Result<T> = std::result::Result<T, PageSyncError>;

/// Element id the host application renders its full-viewport intro into.
pub const INTRO_FULL_VIEWPORT_ID: &str = "intro-full-viewport";
