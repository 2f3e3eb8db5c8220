//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = PageSyncConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_dimensions_delay() {
    let mut config = PageSyncConfig::default();
    config.throttle.dimensions_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("throttle.dimensions_ms"));
}

#[test]
fn catches_huge_scroll_delay() {
    let mut config = PageSyncConfig::default();
    config.throttle.scroll_ms = 60_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("throttle.scroll_ms"));
}

#[test]
fn catches_empty_element_id() {
    let mut config = PageSyncConfig::default();
    config.target.element_id = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("target.element_id"));
}

#[test]
fn catches_element_id_with_quotes() {
    let mut config = PageSyncConfig::default();
    config.target.element_id = "intro\"); alert(1); (\"".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("target.element_id"));
}

#[test]
fn element_id_pattern() {
    assert!(is_valid_element_id("intro-full-viewport"));
    assert!(is_valid_element_id("a"));
    assert!(is_valid_element_id("hero_v2.main:top"));
    assert!(!is_valid_element_id("1st"));
    assert!(!is_valid_element_id("has space"));
    assert!(!is_valid_element_id(""));
}

#[test]
fn catches_window_too_small() {
    let mut config = PageSyncConfig::default();
    config.window.width = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_unsupported_url_scheme() {
    let mut config = PageSyncConfig::default();
    config.window.url = Some("javascript:alert(1)".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.url"));
}

#[test]
fn accepts_https_url() {
    let mut config = PageSyncConfig::default();
    config.window.url = Some("https://example.org/".into());
    assert!(validate(&config).is_ok());
}

#[test]
fn collects_multiple_errors() {
    let mut config = PageSyncConfig::default();
    config.throttle.scroll_ms = 0;
    config.window.height = 9000;
    config.target.element_id = "no spaces allowed".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("throttle.scroll_ms"));
    assert!(err.contains("window.height"));
    assert!(err.contains("target.element_id"));
}
