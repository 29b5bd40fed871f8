use std::fs;

use tempfile::tempdir;

use quiver_cli::{Args, run};

const TRAFFIC_LIGHT: &str = r#"{
    "states": [
        {"name": "green", "marked": true},
        {"name": "yellow"},
        {"name": "red"}
    ],
    "transitions": [
        {"from": "green", "to": "yellow", "label": "caution"},
        {"from": "yellow", "to": "red", "label": "stop"},
        {"from": "red", "to": "green", "label": "go"},
        {"from": "red", "to": "red", "label": "wait"}
    ],
    "initial": "green"
}"#;

#[test]
fn e2e_smoke_test_renders_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let input_path = temp_dir.path().join("traffic_light.json");
    fs::write(&input_path, TRAFFIC_LIGHT).expect("Failed to write input file");

    let output_path = temp_dir.path().join("traffic_light.svg");

    let args = Args {
        input: input_path.to_string_lossy().to_string(),
        output: output_path.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    };

    run(&args).expect("Rendering should succeed");

    let svg = fs::read_to_string(&output_path).expect("Output file should exist");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    for state in ["green", "yellow", "red"] {
        assert!(svg.contains(state), "missing state `{state}`");
    }
}

#[test]
fn e2e_smoke_test_rejects_invalid_snapshot() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let input_path = temp_dir.path().join("broken.json");
    fs::write(
        &input_path,
        r#"{"states": [{"name": "a"}], "transitions": [], "initial": "ghost"}"#,
    )
    .expect("Failed to write input file");

    let args = Args {
        input: input_path.to_string_lossy().to_string(),
        output: temp_dir.path().join("out.svg").to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err());
}

#[test]
fn e2e_smoke_test_respects_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let input_path = temp_dir.path().join("machine.json");
    fs::write(&input_path, TRAFFIC_LIGHT).expect("Failed to write input file");

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
        [style]
        stroke_color = "navy"
        background_color = "white"
        "#,
    )
    .expect("Failed to write config file");

    let output_path = temp_dir.path().join("machine.svg");

    let args = Args {
        input: input_path.to_string_lossy().to_string(),
        output: output_path.to_string_lossy().to_string(),
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };

    run(&args).expect("Rendering should succeed");

    let svg = fs::read_to_string(&output_path).expect("Output file should exist");
    assert!(svg.contains("navy"));
    assert!(svg.contains("<rect"));
}
