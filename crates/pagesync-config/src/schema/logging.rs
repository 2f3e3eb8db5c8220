//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber::EnvFilter` directive scoped to the pagesync crates.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Trace => "pagesync=trace",
            Self::Debug => "pagesync=debug",
            Self::Info => "pagesync=info",
            Self::Warn => "pagesync=warn",
            Self::Error => "pagesync=error",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
