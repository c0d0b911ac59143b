//! Integration tests for the tempora CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn process(input: &str) -> Command {
    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.env_remove("TEMPORA_EXPRESSIONS")
        .arg("process")
        .arg("-i")
        .arg(fixture_path(input))
        .arg("-x")
        .arg(fixture_path("expressions.json"));
    cmd
}

#[test]
fn test_process_text() {
    process("romanian-sample.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("0-10\tDATETIME\tSecolul XX"))
        .stdout(predicate::str::contains("DATETIME\tanul 1846"))
        .stdout(predicate::str::contains(
            "http://data.example.org/time/year/1846..http://data.example.org/time/year/1846",
        ));
}

#[test]
fn test_pipe_output() {
    process("romanian-sample.txt")
        .arg("-f")
        .arg("pipe")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "input value|prepared value|normalized edge values|normalized values\n",
        ))
        .stdout(predicate::str::contains(
            "Secolul XX|secolul XX|[{start=http://data.example.org/time/year/1901, \
             end=http://data.example.org/time/year/2000}]|[http://data.example.org/time/century/20]",
        ))
        .stdout(predicate::str::contains("anul 1846|anul 1846|"));
}

#[test]
fn test_json_output() {
    process("romanian-sample.txt")
        .arg("-f")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entities\""))
        .stdout(predicate::str::contains("\"binding\": \"series\""))
        .stdout(predicate::str::contains("\"start_uri\""));
}

#[test]
fn test_markdown_output() {
    process("romanian-sample.txt")
        .arg("-f")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Secolul XX** `DATETIME`"))
        .stdout(predicate::str::contains("---"))
        .stdout(predicate::str::contains("*Total entities: 2*"));
}

#[test]
fn test_expression_preset_label() {
    process("romanian-sample.txt")
        .arg("--preset")
        .arg("expression")
        .assert()
        .success()
        .stdout(predicate::str::contains("\tDATE\tSecolul XX"));
}

#[test]
fn test_unknown_text_produces_nothing() {
    process("plain-sample.txt")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_boundary_mismatch_reported() {
    process("boundary-sample.txt")
        .arg("-f")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("boundary_mismatch"))
        .stdout(predicate::str::contains("\"entities\": []"));
}

#[test]
fn test_tagged_input_gains_semantics() {
    process("corpus.tsv")
        .arg("--input-format")
        .arg("tagged")
        .arg("-f")
        .arg("pipe")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secolul XX|secolul XX|[{start="))
        .stdout(predicate::str::contains("ieri|ieri|[]|[]"));
}

#[test]
fn test_json_documents_update_existing_entity() {
    process("documents.json")
        .arg("--input-format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PERIOD\tSecolul XX\thttp://data.example.org/time/year/1901",
        ));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("output.txt");

    process("romanian-sample.txt")
        .arg("-q")
        .arg("-o")
        .arg(&output_file)
        .assert()
        .success();

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("Secolul XX"));
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("tempora.toml");
    fs::write(
        &config,
        "[alignment]\nlabel = \"TIMEX\"\n\n[output]\ndefault_format = \"markdown\"\n",
    )
    .unwrap();

    process("romanian-sample.txt")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("`TIMEX`"));
}

#[test]
fn test_glob_pattern() {
    process("*-sample.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secolul XX"));
}

#[test]
fn test_invalid_file() {
    process("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_missing_expressions() {
    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.env_remove("TEMPORA_EXPRESSIONS")
        .arg("process")
        .arg("-i")
        .arg(fixture_path("romanian-sample.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--expressions"));
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("generate-config"));
}

#[test]
fn test_list_presets_and_formats() {
    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.arg("list").arg("presets");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("series"))
        .stdout(predicate::str::contains("expression"));

    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.arg("list").arg("formats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pipe"));
}

#[test]
fn test_generate_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("tempora.toml");

    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.arg("generate-config").arg("-o").arg(&config);
    cmd.assert().success();

    let mut cmd = Command::cargo_bin("tempora").unwrap();
    cmd.arg("validate").arg("-c").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}
