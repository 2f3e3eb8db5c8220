//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod target;
mod throttle;
mod window;

#[cfg(test)]
mod tests;

use crate::schema::PageSyncConfig;
use pagesync_common::ConfigError;

pub use target::is_valid_element_id;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PageSyncConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    target::validate_target(&mut errors, config);
    throttle::validate_throttle(&mut errors, config);
    window::validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
