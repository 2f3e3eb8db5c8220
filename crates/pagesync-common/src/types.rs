use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of the viewport (or of the element standing in for it).
///
/// A snapshot value: it is recomputed for every query and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewportDimensions {
    pub width: u32,
    pub height: u32,
}

impl ViewportDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ViewportDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Absolute document coordinates requested by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollCoords {
    pub x: f64,
    pub y: f64,
}

impl ScrollCoords {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
    Auto,
}

/// Argument of the platform scroll primitive (`window.scrollTo`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollToOptions {
    pub top: f64,
    pub left: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollToOptions {
    /// Smooth scroll to `coords`: `top` is the vertical coordinate.
    pub fn smooth_to(coords: ScrollCoords) -> Self {
        Self {
            top: coords.y,
            left: coords.x,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// Flags handed to the host application constructor at boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootFlags {
    pub intro_full_vp_id: String,
    pub window_size: ViewportDimensions,
}
