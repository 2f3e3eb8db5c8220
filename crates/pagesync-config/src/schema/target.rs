//! Watched element configuration.

use pagesync_common::INTRO_FULL_VIEWPORT_ID;
use serde::{Deserialize, Serialize};

/// The element whose appearance starts size and scroll reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// HTML `id` of the element. Its content box stands in for the viewport
    /// once it exists.
    pub element_id: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            element_id: INTRO_FULL_VIEWPORT_ID.into(),
        }
    }
}
