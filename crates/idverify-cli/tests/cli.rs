use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CARD_TEXT: &str = "GOVERNMENT OF INDIA
Ravi Kumar
DOB: 15/08/1987
Male
1234 1234 1234
Mobile: +91 98765 43210
";

const BOILERPLATE_TEXT: &str = "GOVERNMENT OF INDIA
Unique Identification Authority of India
";

fn idverify() -> Command {
    Command::cargo_bin("idverify").unwrap()
}

fn write(dir: &Path, name: &str, content: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn process_text_prints_extracted_fields() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "card.txt", CARD_TEXT.as_bytes());

    let output = idverify().args(["process", &input]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["extracted"]["name"], "Ravi Kumar");
    assert_eq!(report["extracted"]["dateOfBirth"], "15/08/1987");
    assert_eq!(report["extracted"]["idNumber"], "123412341234");
    assert_eq!(report["extracted"]["phoneNumber"], "9876543210");
    assert!(report.get("verdict").is_none());
}

#[test]
fn process_with_entered_values_prints_verdict() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "card.txt", CARD_TEXT.as_bytes());

    idverify()
        .args([
            "process",
            &input,
            "--format",
            "text",
            "--name",
            "ravi kumar sharma",
            "--id-number",
            "123412341234",
            "--phone",
            "+919876543210",
            "--dob",
            "08/15/1987",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date of birth: no match"))
        .stdout(predicate::str::contains("Result: PASS (3/4 fields matched)"));
}

#[test]
fn process_boilerplate_only_reports_no_data() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "blank.txt", BOILERPLATE_TEXT.as_bytes());

    idverify()
        .args(["process", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data found in document"));
}

#[test]
fn process_missing_input_fails() {
    idverify()
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_image_without_models_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "card.png", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
    let models = dir.path().join("models");

    idverify()
        .args(["process", &input, "--model-dir"])
        .arg(&models)
        .assert()
        .failure()
        .stderr(predicate::str::contains("model file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", CARD_TEXT.as_bytes());
    write(dir.path(), "b.txt", BOILERPLATE_TEXT.as_bytes());
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.txt");

    idverify()
        .arg("batch")
        .arg(pattern.to_string_lossy().as_ref())
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out.join("a.json").exists());
    assert!(!out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines[0],
        "filename,status,fields_found,name,dateOfBirth,idNumber,phoneNumber,processing_time_ms,error"
    );
    assert!(lines[1].starts_with("a.txt,success,4,Ravi Kumar,15/08/1987,123412341234,9876543210,"));
    assert!(lines[2].starts_with("b.txt,error,0,"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", BOILERPLATE_TEXT.as_bytes());
    let pattern = dir.path().join("*.txt");

    idverify()
        .arg("batch")
        .arg(pattern.to_string_lossy().as_ref())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_init_set_get_round() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_string_lossy();

    idverify()
        .args(["--config", &config, "config", "init"])
        .assert()
        .success();

    idverify()
        .args(["--config", &config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    idverify()
        .args(["--config", &config, "config", "set", "upload.max_bytes", "2048"])
        .assert()
        .success();

    idverify()
        .args(["--config", &config, "config", "get", "upload.max_bytes"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2048\n"));

    idverify()
        .args(["--config", &config, "config", "set", "upload.max_bytes", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    idverify()
        .args(["--config", &config, "config", "set", "ocr.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_extra_denylist_changes_extraction() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_string_lossy();
    let input = write(dir.path(), "card.txt", b"Specimen Holder\nSita Devi\n");

    idverify()
        .args([
            "--config",
            &config,
            "config",
            "set",
            "extraction.extra_denylist",
            r#"["specimen"]"#,
        ])
        .assert()
        .success();

    let output = idverify()
        .args(["--config", &config, "process", &input])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["extracted"]["name"], "Sita Devi");
}
