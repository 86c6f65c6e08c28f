//! End-to-end runs of the command tree against temporary files

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use staffdesk_cli::config::Config;
use staffdesk_cli::{command, execute, load_config};
use staffdesk_store::seed;
use staffdesk_test_utils::{address_json, handbook_json, w4_form_json};
use std::io::Write;
use tempfile::NamedTempFile;

fn run(args: &[&str]) -> (bool, String) {
    let matches = command()
        .try_get_matches_from(std::iter::once("staffdesk").chain(args.iter().copied()))
        .unwrap();
    let config = load_config(&matches).unwrap();
    let mut out = Vec::new();
    let passed = execute(&matches, &config, &mut out).unwrap();
    (passed, String::from_utf8(out).unwrap())
}

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn schemas_lists_catalog() {
    let (passed, text) = run(&["schemas"]);
    assert!(passed);
    let names: Vec<&str> = text.lines().collect();
    assert!(names.contains(&"address"));
    assert!(names.contains(&"employee"));
    assert!(names.contains(&"w4_form"));
}

#[test]
fn validate_json_file() {
    let file = temp_file(&address_json().to_string());
    let path = file.path().to_str().unwrap();

    let (passed, text) = run(&["validate", "address", path]);
    assert!(passed);
    assert_eq!(text, "address: valid\n");
}

#[test]
fn validate_yaml_file_reports_nested_path() {
    let mut handbook = handbook_json(2);
    handbook["sections"][0]["subsections"][0]["title"] = json!("x".repeat(51));
    let file = temp_file(&serde_yaml::to_string(&handbook).unwrap());
    let path = file.path().to_str().unwrap();

    let (passed, text) = run(&["validate", "handbook", path, "--json"]);
    assert!(!passed);
    let report: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["schema"], json!("handbook"));
    assert_eq!(
        report["issues"][0]["path"],
        json!("sections[0].subsections[0].title")
    );
    assert_eq!(report["issues"][0]["rule"], json!("max_length"));
}

#[test]
fn missing_candidate_file_is_an_error() {
    let matches = command()
        .try_get_matches_from(["staffdesk", "validate", "address", "/nonexistent/address.json"])
        .unwrap();
    let mut out = Vec::new();
    let err = execute(&matches, &Config::default(), &mut out).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/address.json"));
}

#[test]
fn config_file_enables_strict_totals() {
    let mut form = w4_form_json();
    form["step3c"] = json!(1.0);
    let candidate = temp_file(&form.to_string());
    let candidate = candidate.path().to_str().unwrap();

    let (lenient, _) = run(&["validate", "w4_form", candidate]);
    assert!(lenient);

    let config = temp_file("[registry]\nstrict_w4_totals = true\n");
    let config = config.path().to_str().unwrap();
    let (strict, text) = run(&["--config", config, "validate", "w4_form", candidate]);
    assert!(!strict);
    assert!(text.contains("step3c"));
}

#[test]
fn malformed_config_is_an_error() {
    let config = temp_file("[registry\n");
    let matches = command()
        .try_get_matches_from(["staffdesk", "--config", config.path().to_str().unwrap(), "schemas"])
        .unwrap();
    assert!(load_config(&matches).is_err());
}

#[test]
fn export_prints_draft07_document() {
    let (passed, text) = run(&["export", "address"]);
    assert!(passed);
    let document: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["title"], json!("address"));
    assert!(document["$schema"].as_str().unwrap().contains("draft-07"));
}

#[test]
fn mock_output_validates() {
    let (passed, text) = run(&["mock", "store_profile", "--seed", "3", "--count", "4"]);
    assert!(passed);
    assert_eq!(text.lines().count(), 4);

    for line in text.lines() {
        let file = temp_file(line);
        let (valid, report) = run(&["validate", "store_profile", file.path().to_str().unwrap()]);
        assert!(valid, "{report}");
    }
}

#[test]
fn snapshot_round_trips_through_audit() {
    let (passed, text) = run(&["snapshot"]);
    assert!(passed);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, serde_json::to_value(seed::initial_snapshot()).unwrap());

    let file = temp_file(&text);
    let (clean, report) = run(&["audit", file.path().to_str().unwrap()]);
    assert!(clean);
    assert_eq!(report, "consistent\n");
}

#[test]
fn audit_flags_dangling_brand() {
    let mut snapshot = seed::initial_snapshot();
    snapshot.employees[0].bid = "b-missing".into();
    let file = temp_file(&serde_json::to_string(&snapshot).unwrap());

    let (clean, report) = run(&["audit", file.path().to_str().unwrap()]);
    assert!(!clean);
    assert!(report.contains("b-missing"));
}
