//! Window and WebView configuration types.

use serde::{Deserialize, Serialize};

/// Host window settings for `pagesync run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in pixels (valid range: 200-8192).
    pub width: u32,
    /// Logical height in pixels (valid range: 200-8192).
    pub height: u32,
    /// Enable WebView dev tools (always on in debug builds).
    pub devtools: bool,
    /// Page to load. The bundled demo page is used when unset.
    pub url: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "pagesync".into(),
            width: 1280,
            height: 800,
            devtools: false,
            url: None,
        }
    }
}
