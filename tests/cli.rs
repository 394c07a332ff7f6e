//! End-to-end tests of the jsift binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The binary with user configuration isolated
fn jsift(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jsift").unwrap();
    cmd.env("JSIFT_CONFIG", config_dir.path().join("config.json"));
    cmd.env_remove("JSIFT_LOG");
    cmd
}

#[test]
fn test_query_prints_table() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .args(["--query", "nam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuzzy Search Results"))
        .stdout(predicate::str::contains("user.name"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_value_query_lists_keys() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .args(["--query", "vip", "--values"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user.tags"));
}

#[test]
fn test_only_restricts_keys() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .args(["--query", "nam", "--only", "tags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found."))
        .stdout(predicate::str::contains("user.name").not());
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let output = jsift(&dir)
        .arg(fixture("user.json"))
        .args(["--query", "address", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let hits: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let address = hits
        .as_array()
        .unwrap()
        .iter()
        .find(|hit| hit["key"] == "user.address")
        .unwrap();
    assert_eq!(address["display"], "tree");
    assert_eq!(address["values"][0]["city"], "Oslo");
}

#[test]
fn test_csv_columns() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("people.csv"))
        .args(["--query", "city"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Oslo"))
        .stdout(predicate::str::contains("Rome"));
}

#[test]
fn test_chart() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .arg("--chart")
        .assert()
        .success()
        .stdout(predicate::str::contains("user.json"))
        .stdout(predicate::str::contains("├── user"))
        .stdout(predicate::str::contains("name: Alice"))
        .stdout(predicate::str::contains("- vip"));
}

#[test]
fn test_histogram() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .arg("--histogram")
        .assert()
        .success()
        .stdout(predicate::str::contains("Key Histogram:"))
        .stdout(predicate::str::contains("orders.id"))
        .stdout(predicate::str::contains("Value Histogram:"))
        .stdout(predicate::str::contains("book"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(dir.path().join("nope.json"))
        .args(["--query", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"a\": ").unwrap();
    jsift(&dir)
        .arg(&path)
        .arg("--chart")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON format"));
}

#[test]
fn test_plain_prompt_session() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .arg("--plain")
        .write_stdin("/mode\nbook\n/only item\n/exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[user.json] Search> "))
        .stdout(predicate::str::contains("Search set to values."))
        .stdout(predicate::str::contains("orders.item"))
        .stdout(predicate::str::contains("limited to keys containing: item"));
}

#[test]
fn test_plain_starts_without_data() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(dir.path().join("nope.json"))
        .arg("--plain")
        .write_stdin("name\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found"))
        .stdout(predicate::str::contains("No data loaded"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), "{oops").unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .args(["--query", "nam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_verbose_prints_log() {
    let dir = TempDir::new().unwrap();
    jsift(&dir)
        .arg(fixture("user.json"))
        .args(["--query", "nam", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Log File Content ---"))
        .stdout(predicate::str::contains("loaded document"));
}
