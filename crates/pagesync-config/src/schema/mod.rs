//! Configuration schema types for pagesync.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod target;
mod throttle;
mod window;

pub use logging::*;
pub use target::*;
pub use throttle::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for pagesync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSyncConfig {
    pub target: TargetConfig,
    pub throttle: ThrottleConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}
