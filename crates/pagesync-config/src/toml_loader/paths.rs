//! Config path resolution and default file creation.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use pagesync_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "pagesync";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/pagesync/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented default config to `path`, creating parent
/// directories as needed. Overwrites an existing file.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create config directory", parent, e))?;
    }
    std::fs::write(path, default_config_toml())
        .map_err(|e| io_error("write default config to", path, e))?;

    info!(path = %path.display(), "created default config");
    Ok(())
}

fn io_error(action: &str, path: &Path, e: impl Display) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {e}", path.display()))
}
