//! Target element id validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::PageSyncConfig;

static ELEMENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_:.-]*$").expect("element id pattern is valid")
});

/// Whether `id` can be looked up with `document.getElementById` and embedded
/// in generated scripts without escaping surprises.
pub fn is_valid_element_id(id: &str) -> bool {
    ELEMENT_ID.is_match(id)
}

pub(crate) fn validate_target(errors: &mut Vec<String>, config: &PageSyncConfig) {
    let id = &config.target.element_id;
    if !is_valid_element_id(id) {
        errors.push(format!("target.element_id = {id:?} is not a valid element id"));
    }
}
