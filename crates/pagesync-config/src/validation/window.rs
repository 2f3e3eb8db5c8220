//! Window and page source validation.

use crate::schema::PageSyncConfig;

use super::helpers::validate_range;

const ALLOWED_URL_SCHEMES: &[&str] = &["https://", "http://", "file://"];

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &PageSyncConfig) {
    validate_range(errors, "window.width", config.window.width, 200, 8192);
    validate_range(errors, "window.height", config.window.height, 200, 8192);

    if let Some(url) = &config.window.url {
        if !ALLOWED_URL_SCHEMES.iter().any(|s| url.starts_with(s)) {
            errors.push(format!(
                "window.url = {url:?} must start with one of {}",
                ALLOWED_URL_SCHEMES.join(", ")
            ));
        }
    }
}
