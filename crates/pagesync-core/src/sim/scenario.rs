//! Scripted timelines replayed against a [`SimPage`].
//!
//! ```toml
//! settle_ms = 1000
//!
//! [window]
//! width = 1280
//! height = 800
//!
//! [[step]]
//! at_ms = 0
//! kind = "boot"
//!
//! [[step]]
//! at_ms = 150
//! kind = "insert"
//! id = "intro-full-viewport"
//! width = 1264
//! height = 700
//! ```

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use pagesync_common::{
    BootFlags, OutboundMessage, PageSyncError, Result, ScrollCoords, ScrollToOptions,
    ViewportDimensions,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{RecordingHost, SimPage};
use crate::context::{SyncContext, SyncSettings};
use crate::platform::Timers;
use crate::scheduler::Scheduler;
use crate::sync::ViewportSync;
use crate::watcher::WatchState;

const DEFAULT_SETTLE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_window")]
    pub window: ViewportDimensions,
    /// Time simulated after the last step so pending throttles fire.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    /// Construct the host application and attach it to the gate.
    Boot,
    Insert { id: String, width: u32, height: u32 },
    Remove { id: String },
    /// A structural change unrelated to any element id.
    Mutate,
    Resize { id: String, width: u32, height: u32 },
    WindowResize { width: u32, height: u32 },
    /// User scroll to a position.
    Scroll { x: f64, y: f64 },
    /// Inbound `performSmoothScrollTo` from the host application.
    ScrollTo { x: f64, y: f64 },
}

fn default_window() -> ViewportDimensions {
    ViewportDimensions::new(1280, 800)
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Scenario =
            toml::from_str(content).map_err(|e| PageSyncError::Scenario(e.to_string()))?;
        scenario.check()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn check(&self) -> Result<()> {
        let mut last = 0;
        let mut boots = 0;
        for (index, step) in self.steps.iter().enumerate() {
            if step.at_ms < last {
                return Err(PageSyncError::Scenario(format!(
                    "step {index} at {}ms goes back in time (previous step at {last}ms)",
                    step.at_ms
                )));
            }
            last = step.at_ms;
            if step.action == StepAction::Boot {
                boots += 1;
            }
        }
        if boots > 1 {
            return Err(PageSyncError::Scenario(format!(
                "host application booted {boots} times, at most once allowed"
            )));
        }
        Ok(())
    }

    /// Replay the timeline. The watcher is installed before the first step,
    /// as the page bootstrap does before constructing the host app.
    pub fn run(&self, settings: &SyncSettings) -> Result<Transcript> {
        let scheduler = Rc::new(Scheduler::new());
        let page = Rc::new(SimPage::new(self.window));
        let ctx = SyncContext::new(settings.clone(), page.clone(), scheduler.clone());
        let host = Rc::new(RecordingHost::with_clock(scheduler.clone()));
        let sync = ViewportSync::start(ctx.clone(), page.clone());

        let mut entries = Vec::new();
        let mut found_logged = false;
        let mut note_discovery = |entries: &mut Vec<TranscriptEntry>, at_ms: u64| {
            if !found_logged && sync.state() == WatchState::Found {
                found_logged = true;
                entries.push(TranscriptEntry::WatcherFound {
                    at_ms,
                    element: settings.target_id.clone(),
                });
            }
        };
        note_discovery(&mut entries, 0);

        let mut end_ms = 0;
        for step in &self.steps {
            scheduler.advance_to(step.at_ms);
            let at_ms = scheduler.now_ms();
            debug!(at_ms, action = ?step.action, "scenario step");

            match &step.action {
                StepAction::Boot => {
                    let flags = ctx.boot_flags();
                    ctx.attach_host(host.clone())?;
                    entries.push(TranscriptEntry::Booted { at_ms, flags });
                }
                StepAction::Insert { id, width, height } => {
                    page.insert_element(id, ViewportDimensions::new(*width, *height));
                }
                StepAction::Remove { id } => {
                    page.remove_element(id);
                }
                StepAction::Mutate => page.emit_anonymous_mutation(),
                StepAction::Resize { id, width, height } => {
                    page.resize_element(id, ViewportDimensions::new(*width, *height));
                }
                StepAction::WindowResize { width, height } => {
                    page.resize_window(ViewportDimensions::new(*width, *height));
                }
                StepAction::Scroll { x, y } => page.scroll_by_user(ScrollCoords::new(*x, *y)),
                StepAction::ScrollTo { x, y } => {
                    let before = page.scroll_calls().len();
                    ctx.bridge.on_smooth_scroll_to(ScrollCoords::new(*x, *y));
                    for options in page.scroll_calls().into_iter().skip(before) {
                        entries.push(TranscriptEntry::ScrollPrimitive { at_ms, options });
                    }
                }
            }
            note_discovery(&mut entries, at_ms);
            end_ms = at_ms;
        }

        scheduler.advance_to(end_ms.saturating_add(self.settle_ms));

        entries.extend(host.sent().into_iter().map(|sent| TranscriptEntry::Outbound {
            at_ms: sent.at_ms,
            message: sent.message,
        }));
        // Stable: same-time entries keep step order, outbound last.
        entries.sort_by_key(TranscriptEntry::at_ms);

        let transcript = Transcript { entries };
        info!(
            entries = transcript.entries.len(),
            outbound = transcript.outbound().count(),
            "scenario finished"
        );
        Ok(transcript)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Booted { at_ms: u64, flags: BootFlags },
    WatcherFound { at_ms: u64, element: String },
    Outbound { at_ms: u64, message: OutboundMessage },
    ScrollPrimitive { at_ms: u64, options: ScrollToOptions },
}

impl TranscriptEntry {
    pub fn at_ms(&self) -> u64 {
        match self {
            Self::Booted { at_ms, .. }
            | Self::WatcherFound { at_ms, .. }
            | Self::Outbound { at_ms, .. }
            | Self::ScrollPrimitive { at_ms, .. } => *at_ms,
        }
    }
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>7}ms  ", self.at_ms())?;
        match self {
            Self::Booted { flags, .. } => write!(
                f,
                "boot      introFullVpId={} windowSize={}",
                flags.intro_full_vp_id, flags.window_size
            ),
            Self::WatcherFound { element, .. } => write!(f, "found     #{element}"),
            Self::Outbound { message, .. } => {
                write!(f, "send      {} {}", message.port(), message.payload())
            }
            Self::ScrollPrimitive { options, .. } => write!(
                f,
                "scrollTo  top={} left={} behavior={:?}",
                options.top, options.left, options.behavior
            ),
        }
    }
}

/// Everything observable from a scenario run, in time order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn outbound(&self) -> impl Iterator<Item = &OutboundMessage> {
        self.entries.iter().filter_map(|e| match e {
            TranscriptEntry::Outbound { message, .. } => Some(message),
            _ => None,
        })
    }

    pub fn found_at(&self) -> Option<u64> {
        self.entries.iter().find_map(|e| match e {
            TranscriptEntry::WatcherFound { at_ms, .. } => Some(*at_ms),
            _ => None,
        })
    }

    /// One JSON object per entry.
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            let line =
                serde_json::to_string(entry).map_err(|e| PageSyncError::Other(e.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}
