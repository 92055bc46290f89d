#![allow(missing_docs)]
// CLI smoke tests. Nothing here touches the network: `scan` without
// `--ai` and `patterns` are pure, and `interest` reads stdin.

use std::io::Write;

use assert_cmd::Command;

fn chaperone() -> Command {
    Command::cargo_bin("chaperone").expect("binary should build")
}

#[test]
fn patterns_lists_the_rule_table() {
    let assert = chaperone().arg("patterns").assert().success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(output.contains("financial_request"));
    assert!(output.contains("platform_migration"));
}

#[test]
fn patterns_json_is_valid_json() {
    let assert = chaperone().args(["--json", "patterns"]).assert().success();
    let output = assert.get_output().stdout.clone();
    let rows: serde_json::Value =
        serde_json::from_slice(&output).expect("patterns --json must emit valid JSON");
    assert!(rows.as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn scan_reports_unsafe_conversation() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"text": "can you send me money for an emergency", "timestamp": 0, "sender": "contact"}}]"#
    )
    .expect("write fixture");

    let assert = chaperone()
        .arg("scan")
        .arg(file.path())
        .assert()
        .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(output.contains("CAUTION"));
    assert!(output.contains("Financial request"));
}

#[test]
fn scan_json_round_trips() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"text": "hello there!", "timestamp": 0, "sender": "match"}}]"#
    )
    .expect("write fixture");

    let assert = chaperone()
        .args(["--json", "scan"])
        .arg(file.path())
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)
        .expect("scan --json must emit valid JSON");
    assert_eq!(report["pattern_analysis"]["is_safe"], true);
    assert!(report["ai"].is_null());
}

#[test]
fn scan_rejects_malformed_input() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "this is not json").expect("write fixture");

    chaperone().arg("scan").arg(file.path()).assert().failure();
}

#[test]
fn interest_reads_stdin() {
    let assert = chaperone()
        .args(["interest", "-"])
        .write_stdin("You: hi\nThem: hey! how are you? 😊")
        .assert()
        .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(output.contains("score"));
    assert!(output.contains("question rate"));
}
