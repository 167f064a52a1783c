use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::tempdir;

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("emosearch-core")
        .join("tests")
        .join("fixtures")
        .join("catalog.json")
}

fn emosearch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_emosearch"))
        .arg("--catalog")
        .arg(fixture_catalog())
        .args(args)
        .env_remove("EMOSEARCH_CATALOG")
        .output()
        .expect("run emosearch")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn find_json_returns_cat_records() {
    let output = emosearch(&["find", "cat", "--json"]);
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let parsed: Value = serde_json::from_str(&stdout).expect("parse json output");
    let arr = parsed.as_array().expect("find --json returns a JSON array");

    let glyphs: Vec<&str> = arr.iter().filter_map(|r| r["emoji"].as_str()).collect();
    assert_eq!(glyphs, vec!["😺", "😼"]);
}

#[test]
fn find_override_respects_limit() {
    let output = emosearch(&["find", ")", "--limit", "1", "--color", "never"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout:\n{stdout}");
    assert!(lines[0].starts_with("😊"), "stdout:\n{stdout}");
}

#[test]
fn find_country_code_is_case_insensitive() {
    let output = emosearch(&["find", "GB", "--ndjson"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("ndjson line"))
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["emoji"], "🇬🇧");
}

#[test]
fn missing_catalog_is_not_fatal() {
    let tmp = tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_emosearch"))
        .arg("--catalog")
        .arg(tmp.path().join("absent.json"))
        .args(["find", "cat"])
        .env("EMOSEARCH_LOG", "off")
        .output()
        .expect("run emosearch");

    assert_success(&output);
    assert!(output.stdout.is_empty());
}

#[test]
fn catalog_can_come_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_emosearch"))
        .env("EMOSEARCH_CATALOG", fixture_catalog())
        .args(["find", "secret", "--color", "never"])
        .output()
        .expect("run emosearch");

    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("🤐"), "stdout:\n{stdout}");
}

#[test]
fn batch_answers_stdin_in_order() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_emosearch"))
        .arg("--catalog")
        .arg(fixture_catalog())
        .args(["batch", "--limit", "1", "--jobs", "2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn emosearch");

    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(b"gb\ncat\n\n:p\nzzzz\n")
        .expect("write queries");

    let output = child.wait_with_output().expect("wait emosearch");
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["gb\t🇬🇧", "cat\t😺", ":p\t😋", "zzzz\t"]);
}

#[test]
fn columns_output_is_ansi_free_with_color_never() {
    let output = emosearch(&["find", "love", "--columns", "--color", "never"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().count() > 0, "expected some rows");
    assert!(!stdout.contains("\u{1b}["));
}
