//! DOM geometry reported by the page script with every feed event.

use std::collections::BTreeMap;

use pagesync_common::ViewportDimensions;
use serde::{Deserialize, Serialize};

/// Window inner size plus the client box of every tracked element that is
/// currently in the document. Absent ids are absent from `elements`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomSnapshot {
    pub window: ViewportDimensions,
    #[serde(default)]
    pub elements: BTreeMap<String, ViewportDimensions>,
}

impl DomSnapshot {
    pub fn element(&self, id: &str) -> Option<ViewportDimensions> {
        self.elements.get(id).copied()
    }
}
