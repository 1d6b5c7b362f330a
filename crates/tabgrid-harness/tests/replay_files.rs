//! End-to-end runs of the harness commands against files on disk.

use std::fs;

use tabgrid_harness::HarnessError;
use tabgrid_harness::cli::{Commands, ReplayArgs, ValidateArgs, render};
use tabgrid_harness::replay::{load_config, replay_file};
use tempfile::tempdir;

const SCRIPT: &str = r#"[
    {"op": "set_layout", "layout": "TRIPLE_VERT_LEFT"},
    {"op": "resize", "width": 1000, "height": 800},
    {"op": "drag", "separator": 4, "dx": -100, "dy": 0}
]"#;

#[test]
fn replay_command_prints_final_rects() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.json");
    fs::write(&script, SCRIPT).unwrap();

    let out = render(Commands::Replay(ReplayArgs {
        script,
        config: None,
    }))
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["layout"], "TRIPLE_VERT_LEFT");
    assert_eq!(value["frame_count"], 3);
    assert_eq!(value["rects"][0]["width"], 399);
    assert_eq!(value["rects"][1]["x"], 401);
    assert_eq!(value["issues"].as_array().map(Vec::len), Some(0));
}

#[test]
fn replay_honours_separator_config() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("steps.json");
    let config = dir.path().join("tabgrid.toml");
    fs::write(&script, SCRIPT).unwrap();
    fs::write(&config, "separator_px = 4\n").unwrap();

    let report = replay_file(&script, Some(&config)).unwrap();
    assert_eq!(report.rects[0].rect.width, 398);
    assert_eq!(report.rects[1].rect.x, 402);
}

#[test]
fn json_config_is_detected_by_extension() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("tabgrid.json");
    fs::write(&config, r#"{"min_frame_width": 0.25}"#).unwrap();
    let loaded = load_config(&config).unwrap();
    assert_eq!(loaded.min_frame_width, 0.25);
}

#[test]
fn invalid_config_is_rejected_with_path() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("tabgrid.toml");
    fs::write(&config, "min_frame_width = 0.9\n").unwrap();
    let err = load_config(&config).unwrap_err();
    assert!(matches!(err, HarnessError::Config { .. }));
    assert!(err.to_string().contains("tabgrid.toml"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn validate_fails_under_strict_minimums() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("strict.toml");
    fs::write(&config, "min_frame_width = 0.3\n").unwrap();

    let err = render(Commands::Validate(ValidateArgs {
        config: Some(config),
        json: false,
    }))
    .unwrap_err();
    assert!(matches!(err, HarnessError::InvalidTemplates { count } if count > 0));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn validate_passes_with_defaults() {
    let out = render(Commands::Validate(ValidateArgs {
        config: None,
        json: true,
    }))
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["templates"].as_array().map(Vec::len), Some(17));
}

#[test]
fn missing_script_is_io_error() {
    let dir = tempdir().unwrap();
    let err = render(Commands::Replay(ReplayArgs {
        script: dir.path().join("absent.json"),
        config: None,
    }))
    .unwrap_err();
    assert!(matches!(err, HarnessError::Io(_)));
}
