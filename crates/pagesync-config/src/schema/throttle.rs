//! Notification throttling delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-kind throttle delays in milliseconds (valid range: 1-10000).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub dimensions_ms: u32,
    pub scroll_ms: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            dimensions_ms: 200,
            scroll_ms: 200,
        }
    }
}

impl ThrottleConfig {
    pub fn dimensions_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.dimensions_ms))
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.scroll_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_convert_to_durations() {
        let config = ThrottleConfig {
            dimensions_ms: 150,
            scroll_ms: 75,
        };
        assert_eq!(config.dimensions_delay(), Duration::from_millis(150));
        assert_eq!(config.scroll_delay(), Duration::from_millis(75));
    }
}
