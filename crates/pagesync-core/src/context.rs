//! The single context object holding every piece of shared sync state.

use std::rc::Rc;
use std::time::Duration;

use pagesync_common::{BootFlags, CoreError, INTRO_FULL_VIEWPORT_ID};
use pagesync_config::PageSyncConfig;

use crate::bridge::PortBridge;
use crate::dimensions::DimensionSource;
use crate::gate::{AppGate, HostApp};
use crate::platform::{Platform, Timers};
use crate::throttle::Throttler;

const DEFAULT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub target_id: String,
    pub dimensions_delay: Duration,
    pub scroll_delay: Duration,
}

impl SyncSettings {
    pub fn from_config(config: &PageSyncConfig) -> Self {
        Self {
            target_id: config.target.element_id.clone(),
            dimensions_delay: config.throttle.dimensions_delay(),
            scroll_delay: config.throttle.scroll_delay(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            target_id: INTRO_FULL_VIEWPORT_ID.to_string(),
            dimensions_delay: DEFAULT_DELAY,
            scroll_delay: DEFAULT_DELAY,
        }
    }
}

/// Built once at boot and shared by reference.
pub struct SyncContext {
    pub settings: SyncSettings,
    pub throttler: Throttler,
    pub gate: AppGate,
    pub dimensions: DimensionSource,
    pub bridge: PortBridge,
}

impl SyncContext {
    pub fn new<P: Platform + 'static>(
        settings: SyncSettings,
        platform: Rc<P>,
        timers: Rc<dyn Timers>,
    ) -> Rc<Self> {
        let gate = AppGate::new();
        let dimensions = DimensionSource::new(platform.clone(), &settings.target_id);
        let bridge = PortBridge::new(gate.clone(), platform);
        Rc::new(Self {
            throttler: Throttler::new(timers),
            settings,
            gate,
            dimensions,
            bridge,
        })
    }

    /// Flags for the host application constructor, measured now.
    pub fn boot_flags(&self) -> BootFlags {
        BootFlags {
            intro_full_vp_id: self.settings.target_id.clone(),
            window_size: self.dimensions.current(),
        }
    }

    pub fn attach_host(&self, app: Rc<dyn HostApp>) -> Result<(), CoreError> {
        self.gate.set_app(app)
    }
}
