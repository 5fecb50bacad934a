//! Integration tests for the headache-diary binary.
//!
//! These tests verify end-to-end behavior including:
//! - Sheet generation in each output format
//! - Medication selection, titration marks and warnings
//! - Configuration and catalog overrides
//! - Rejection of invalid sheet settings

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create an isolated config home
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary with config lookups confined to `home`
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("headache-diary"));
    cmd.env("XDG_CONFIG_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn generate_json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = cli(home)
        .arg("generate")
        .args(["--format", "json"])
        .args(args)
        .output()
        .expect("Failed to run CLI");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Output is not JSON")
}

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Printable headache diary sheet generator",
        ));
}

#[test]
fn test_default_command_prints_sheet() {
    let home = setup_test_dir();
    cli(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Headache Diary & Medication Log"))
        .stdout(predicate::str::contains("Panadol"))
        .stdout(predicate::str::contains("Topamax"));
}

#[test]
fn test_month_rollover_labels() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--start", "2024-01-30", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/31"))
        .stdout(predicate::str::contains("2/1"))
        .stdout(predicate::str::contains("02/01").not());
}

#[test]
fn test_json_model_structure() {
    let home = setup_test_dir();
    let model = generate_json(
        &home,
        &[
            "--start",
            "2024-01-30",
            "--days",
            "14",
            "--acute",
            "panadol,imigran",
            "--preventive",
            "topamax,depakine",
        ],
    );

    let days = model["days"].as_array().unwrap();
    assert_eq!(days.len(), 14);
    assert_eq!(days[0]["day_index"], 1);
    assert_eq!(days[0]["date"], "2024-01-30");
    assert_eq!(days[13]["date"], "2024-02-12");

    let night_only: Vec<bool> = model["preventive"][0]["night_only"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_bool().unwrap())
        .collect();
    assert_eq!(night_only.iter().filter(|&&n| n).count(), 3);
    assert!(night_only[0] && night_only[1] && night_only[2]);

    let warnings = model["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 3);
    assert_eq!(warnings[0]["medication_id"], "topamax");
    assert_eq!(warnings[1]["medication_id"], "depakine");
    assert_eq!(warnings[2]["type"], "titration");
    assert_eq!(model["has_any_warning"], true);
}

#[test]
fn test_no_titration_flag() {
    let home = setup_test_dir();
    let model = generate_json(
        &home,
        &["--start", "2024-03-01", "--preventive", "topamax", "--no-titration"],
    );

    let marked = model["preventive"][0]["night_only"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v.as_bool().unwrap());
    assert!(!marked);

    let warnings = model["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["type"], "medication");
}

#[test]
fn test_empty_and_unknown_selection() {
    let home = setup_test_dir();
    let model = generate_json(
        &home,
        &["--start", "2024-03-01", "--acute", "", "--preventive", "ghost"],
    );

    assert!(model["acute"].as_array().unwrap().is_empty());
    assert!(model["preventive"].as_array().unwrap().is_empty());

    let acute_section = model["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["kind"] == "acute_medication")
        .unwrap();
    let rows = acute_section["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"]["type"], "placeholder");
}

#[test]
fn test_csv_output_to_file() {
    let home = setup_test_dir();
    let out_path = home.path().join("out/diary.csv");

    cli(&home)
        .args(["generate", "--start", "2024-01-30", "--days", "7", "--format", "csv"])
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sheet written"));

    let contents = fs::read_to_string(&out_path).expect("Failed to read CSV");
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "Item / Day,1,2,3,4,5,6,7");
    assert_eq!(lines.next().unwrap(), "Date,1/30,1/31,2/1,2/2,2/3,2/4,2/5");
    assert!(contents.contains(",night,night,night,,,,"));
}

#[test]
fn test_non_positive_days_rejected() {
    let home = setup_test_dir();
    for days in ["0", "-3"] {
        cli(&home)
            .args(["generate", "--days", days])
            .assert()
            .failure()
            .stderr(predicate::str::contains("InvalidConfiguration"));
    }
}

#[test]
fn test_huge_day_count_rejected() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--start", "2024-01-01", "--days", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidConfiguration"))
        .stderr(predicate::str::contains("past the last supported date"));
}

#[test]
fn test_bad_start_date_rejected() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--start", "2024-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidConfiguration"));
}

#[test]
fn test_unusual_day_count_warns_but_renders() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--start", "2024-01-01", "--days", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/10"))
        .stderr(predicate::str::contains("recommended"));
}

#[test]
fn test_config_file_defaults() {
    let home = setup_test_dir();
    let config_dir = home.path().join("headache-diary");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
[sheet]
day_count = 7
acute = ["eve"]
preventive = ["flunarizine"]

[output]
format = "json"
"#,
    )
    .unwrap();

    let output = cli(&home)
        .args(["generate", "--start", "2024-01-01"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let model: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(model["days"].as_array().unwrap().len(), 7);
    assert_eq!(model["acute"][0]["record"]["id"], "eve");
    assert_eq!(model["preventive"][0]["record"]["id"], "flunarizine");
    assert_eq!(model["warnings"][0]["type"], "titration");
}

#[test]
fn test_explicit_missing_config_fails() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--config")
        .arg(home.path().join("absent.toml"))
        .arg("generate")
        .assert()
        .failure();
}

#[test]
fn test_custom_catalog() {
    let home = setup_test_dir();
    let catalog_path = home.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        r#"
[[acute]]
id = "aspirin"
name = "Aspirin"
shape = "round"
color = { fill = "white" }
description = "Round / white"
"#,
    )
    .unwrap();

    cli(&home)
        .arg("catalog")
        .arg("--catalog")
        .arg(&catalog_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("aspirin"))
        .stdout(predicate::str::contains("Panadol").not());

    cli(&home)
        .args(["generate", "--acute", "aspirin", "--catalog"])
        .arg(&catalog_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aspirin"));
}

#[test]
fn test_invalid_catalog_rejected() {
    let home = setup_test_dir();
    let catalog_path = home.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        r#"
[[acute]]
id = "dup"
name = "One"
shape = "round"
color = { fill = "white" }
description = "Round"

[[preventive]]
id = "dup"
name = "Two"
shape = "capsule"
color = { fill = "red" }
description = "Capsule"
"#,
    )
    .unwrap();

    cli(&home)
        .arg("catalog")
        .arg("--catalog")
        .arg(&catalog_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate medication ID 'dup'"));
}

#[test]
fn test_catalog_lists_flags() {
    let home = setup_test_dir();
    cli(&home)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("topamax"))
        .stdout(predicate::str::contains("[titration, warning]"))
        .stdout(predicate::str::contains("Preventive medications:"));
}
