//! Integration tests for the tdg CLI

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the tdg binary
fn tdg() -> Command {
    Command::new(cargo::cargo_bin!("tdg"))
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("main.go"),
        "package main\n\n// TODO: refactor parser into its own package\n// category=core issue=7 estimate=2h\n// needs cleanup\nfunc main() {}\n",
    )
    .unwrap();
    fs::write(temp.path().join("notes.txt"), "// FIXME: ok\n").unwrap();
    temp
}

#[test]
fn test_help() {
    tdg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract TODO comments"));
}

#[test]
fn test_version() {
    tdg()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_prints_json_report() {
    let temp = project();

    let output = tdg()
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let comments = report["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["type"], "TODO");
    assert_eq!(comments[0]["title"], "refactor parser into its own package");
    assert_eq!(comments[0]["body"], "needs cleanup");
    assert_eq!(comments[0]["file"], "main.go");
    assert_eq!(comments[0]["line"], 2);
    assert_eq!(comments[0]["issue"], 7);
    assert_eq!(comments[0]["category"], "core");
    assert_eq!(comments[0]["estimate"], 2.0);
}

#[test]
fn test_thresholds_from_flags() {
    let temp = project();

    tdg()
        .arg("--root")
        .arg(temp.path())
        .args(["--min-words", "0", "--min-chars", "0", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"ok\""));
}

#[test]
fn test_include_filter() {
    let temp = project();

    tdg()
        .arg("--root")
        .arg(temp.path())
        .args(["--include", r"\.txt$", "--min-words", "0", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"))
        .stdout(predicate::str::contains("main.go").not());
}

#[test]
fn test_output_file() {
    let temp = project();
    let out = temp.path().join("report.json");

    tdg()
        .arg("--root")
        .arg(temp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["comments"].as_array().unwrap().len(), 1);
}

#[test]
fn test_log_file() {
    let temp = project();
    let log = temp.path().join("tdg.log");

    tdg()
        .arg("--root")
        .arg(temp.path())
        .arg("--log")
        .arg(&log)
        .assert()
        .success();

    assert!(fs::read_to_string(&log).unwrap().contains("Matched files"));
}

#[test]
fn test_log_reports_concurrency() {
    let temp = project();
    let log = temp.path().join("tdg.log");

    tdg()
        .arg("--root")
        .arg(temp.path())
        .args(["--jobs", "3"])
        .arg("--log")
        .arg(&log)
        .assert()
        .success();

    assert!(fs::read_to_string(&log)
        .unwrap()
        .contains("with up to 3 files at once"));
}

#[test]
fn test_verbose_logs_walked_entries() {
    let temp = project();
    let log = temp.path().join("tdg.log");

    tdg()
        .arg("--root")
        .arg(temp.path())
        .arg("--verbose")
        .arg("--log")
        .arg(&log)
        .assert()
        .success();

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("Walking"));
    assert!(content.contains("main.go"));
}

#[test]
fn test_quiet_log_omits_walked_entries() {
    let temp = project();
    let log = temp.path().join("tdg.log");

    tdg()
        .arg("--root")
        .arg(temp.path())
        .arg("--log")
        .arg(&log)
        .assert()
        .success();

    assert!(!fs::read_to_string(&log).unwrap().contains("Walking"));
}

#[test]
fn test_missing_root_fails() {
    let temp = TempDir::new().unwrap();

    tdg()
        .arg("--root")
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot traverse"));
}

#[test]
fn test_invalid_filter_fails() {
    let temp = project();

    tdg()
        .arg("--root")
        .arg(temp.path())
        .args(["--include", "("])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid include filter"));
}

#[test]
fn test_zero_jobs_rejected() {
    let temp = project();

    tdg()
        .arg("--root")
        .arg(temp.path())
        .args(["--jobs", "0"])
        .assert()
        .code(3);
}
