//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# pagesync configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[target]
# HTML id of the element whose appearance starts size/scroll reporting.
element_id = "intro-full-viewport"

[throttle]
# dimensions_ms = 200    # 1-10000
# scroll_ms = 200        # 1-10000

[window]
# title = "pagesync"
# width = 1280           # 200-8192
# height = 800           # 200-8192
# devtools = false
# url = "https://example.org/"   # bundled demo page when unset

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
