//! Throttle delay validation.

use crate::schema::PageSyncConfig;

use super::helpers::validate_range;

pub(crate) fn validate_throttle(errors: &mut Vec<String>, config: &PageSyncConfig) {
    validate_range(
        errors,
        "throttle.dimensions_ms",
        config.throttle.dimensions_ms,
        1,
        10_000,
    );
    validate_range(errors, "throttle.scroll_ms", config.throttle.scroll_ms, 1, 10_000);
}
