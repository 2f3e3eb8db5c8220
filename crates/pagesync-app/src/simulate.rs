//! `pagesync simulate`: headless scenario replay.

use std::path::Path;

use pagesync_common::Result;
use pagesync_core::sim::{Scenario, Transcript};
use pagesync_core::SyncSettings;

/// Replay the scenario at `path` and return the rendered transcript.
pub fn run(path: &Path, settings: &SyncSettings, json: bool) -> Result<String> {
    let scenario = Scenario::load(path)?;
    let transcript = scenario.run(settings)?;
    render(&transcript, json)
}

pub fn render(transcript: &Transcript, json: bool) -> Result<String> {
    if json {
        return transcript.to_json_lines();
    }
    let mut out = String::new();
    for entry in &transcript.entries {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
settle_ms = 400

[[step]]
at_ms = 0
kind = "boot"

[[step]]
at_ms = 100
kind = "insert"
id = "intro-full-viewport"
width = 1264
height = 800
"#;

    fn write_scenario() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, SCENARIO).unwrap();
        (dir, path)
    }

    #[test]
    fn text_transcript_lists_boot_discovery_and_size() {
        let (_dir, path) = write_scenario();
        let out = run(&path, &SyncSettings::default(), false).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("boot"));
        assert!(lines[1].ends_with("found     #intro-full-viewport"));
        assert!(lines[2].contains("send      receiveWindowSize"));
        assert!(lines[2].trim_start().starts_with("300ms"));
    }

    #[test]
    fn json_transcript_is_one_object_per_line() {
        let (_dir, path) = write_scenario();
        let out = run(&path, &SyncSettings::default(), true).unwrap();

        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["event"], "booted");
        assert_eq!(events[1]["event"], "watcher_found");
        assert_eq!(events[2]["message"]["port"], "receiveWindowSize");
        assert_eq!(events[2]["message"]["payload"]["width"], 1264);
    }

    fn demo(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../demos")
            .join(name)
    }

    #[test]
    fn bundled_late_intro_demo() {
        let transcript = Scenario::load(&demo("late_intro.toml"))
            .unwrap()
            .run(&SyncSettings::default())
            .unwrap();

        let stamps: Vec<u64> = transcript.entries.iter().map(|e| e.at_ms()).collect();
        assert_eq!(stamps, vec![0, 150, 350, 900, 1400, 2000, 2200]);
        assert_eq!(transcript.found_at(), Some(150));
        let ports: Vec<&str> = transcript.outbound().map(|m| m.port()).collect();
        assert_eq!(
            ports,
            vec![
                "receiveWindowSize",
                "receiveWindowSize",
                "notifyScrolling",
                "notifyScrolling",
            ]
        );
    }

    #[test]
    fn bundled_never_appears_demo_only_boots() {
        let out = run(&demo("element_never_appears.toml"), &SyncSettings::default(), false)
            .unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("boot"));
    }

    #[test]
    fn missing_scenario_is_an_error() {
        let err = run(
            Path::new("/tmp/nonexistent_pagesync_scenario.toml"),
            &SyncSettings::default(),
            false,
        );
        assert!(err.is_err());
    }
}
