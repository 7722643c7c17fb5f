//! CLI Command Tests
//!
//! Drives the command dispatcher end to end with on-disk samples, data
//! files and configuration.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use shapegen::cli::{run_command_with, Cli, Config};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

/// Runs a command and returns its parsed response lines
fn run(args: &[&str]) -> Vec<Value> {
    let mut out = Vec::new();
    run_command_with(parse(args), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_infer_with_config() {
    let tmp = TempDir::new().unwrap();
    let sample = write_file(&tmp, "person.json", r#"{"name": "Dave", "location": {"city": "Sheffield"}}"#);
    let config = write_file(&tmp, "shapegen.json", r#"{"pretty": true, "log_level": "error"}"#);

    let cli = parse(&[
        "shapegen",
        "infer",
        "--sample",
        sample.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    let mut out = Vec::new();
    run_command_with(cli, &mut out).unwrap();

    // Pretty output spans several lines but is a single document
    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().count() > 1);
    let response: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(response["status"], "ok");

    let schema = &response["data"]["schema"];
    assert_eq!(schema["fields"][0], json!({ "name": "name", "type": { "exact": "String" } }));
    assert_eq!(schema["fields"][1]["name"], "location");
    assert_eq!(schema["nested"], json!(["Location"]));
}

#[test]
fn test_infer_passthrough_sample() {
    let tmp = TempDir::new().unwrap();
    let sample = write_file(&tmp, "scalar.json", r#""not a hash""#);

    let lines = run(&["shapegen", "infer", "--sample", sample.to_str().unwrap()]);
    assert_eq!(
        lines,
        vec![json!({ "status": "ok", "data": { "passthrough": "not a hash" } })]
    );
}

#[test]
fn test_check_with_data_file() {
    let tmp = TempDir::new().unwrap();
    let sample = write_file(&tmp, "person.json", r#"{"name": "Dave", "age": 40, "active": true}"#);
    let data = write_file(
        &tmp,
        "people.json",
        r#"[{"name": "Sue"}, {"age": "forty"}, {"height": 180}, "Ann"]"#,
    );

    let lines = run(&[
        "shapegen",
        "check",
        "--sample",
        sample.to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
    ]);

    // A failing record is reported and the run carries on
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], json!({ "status": "ok", "data": { "name": "Sue" } }));
    assert_eq!(lines[1]["status"], "error");
    assert_eq!(lines[1]["code"], "SHAPE_TYPE_MISMATCH");
    assert!(lines[1]["message"].as_str().unwrap().contains("String"));
    assert_eq!(lines[2]["code"], "SHAPE_UNKNOWN_FIELD");
    assert_eq!(lines[3]["code"], "SHAPE_CLI_NOT_A_MAPPING");
}

#[test]
fn test_invalid_config_fails_command() {
    let tmp = TempDir::new().unwrap();
    let sample = write_file(&tmp, "person.json", r#"{"name": "Dave"}"#);
    let config = write_file(&tmp, "shapegen.json", r#"{"log_level": "shouty"}"#);

    let cli = parse(&[
        "shapegen",
        "infer",
        "--sample",
        sample.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    let mut out = Vec::new();
    let err = run_command_with(cli, &mut out).unwrap_err();
    assert!(out.is_empty());
    assert_eq!(err.code_str(), "SHAPE_CLI_CONFIG_ERROR");
}

#[test]
fn test_missing_sample_fails_command() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.json");

    let cli = parse(&["shapegen", "infer", "--sample", missing.to_str().unwrap()]);
    let mut out = Vec::new();
    let err = run_command_with(cli, &mut out).unwrap_err();
    assert!(out.is_empty());
    assert_eq!(err.code_str(), "SHAPE_CLI_IO_ERROR");
}

#[test]
fn test_default_config() {
    assert_eq!(Config::default(), Config::load_or_default(None).unwrap());
}
