//! E2E тесты для CLI инструмента `psv-dump`.

use std::fs;

use assert_cmd::Command;
use e2e_tests::fixture;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

/// Создать команду для запуска psv-dump.
///
/// `cargo_bin` deprecated из-за edge case с custom build directories,
/// но это единственный способ для кросс-крейтовых бинарников.
#[expect(deprecated)]
fn psv_dump() -> Command {
    Command::cargo_bin("psv-dump").unwrap()
}

/// Разобрать вывод: по одному JSON-объекту на строку.
fn parse_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Успешное декодирование
// ============================================================================

#[test]
fn test_accounts_to_stdout() {
    let assert = psv_dump()
        .args(["--input", fixture("accounts.psv").to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Decoded 3 record(s)"));

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["AccountID"], "ACC-001");
    assert_eq!(records[0]["PlanSegCreateDate"], "2021-03-04 05:06:07");
    assert_eq!(records[2]["OutstdPrincipal"], "72");
}

#[test]
fn test_accounts_to_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("accounts.jsonl");

    psv_dump()
        .args([
            "-i",
            fixture("accounts.psv").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("\"TranID\":\"9002\""));
}

#[test]
fn test_stdin_input() {
    let assert = psv_dump().write_stdin("A | B\n1 | 2\n").assert().success();

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records, vec![serde_json::json!({ "A": "1", "B": "2" })]);
}

#[test]
fn test_custom_delimiter() {
    let assert = psv_dump()
        .args(["--input", fixture("semicolon.txt").to_str().unwrap(), "--delimiter", ";"])
        .assert()
        .success();

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records[0]["Count"], "1");
}

#[test]
fn test_delimiter_from_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("reader.json");
    fs::write(&config, r#"{ "delimiter": ";" }"#).unwrap();

    let assert = psv_dump()
        .args([
            "--input",
            fixture("semicolon.txt").to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success();

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records[0]["Name"], "alpha");
}

#[test]
fn test_accounts_as_typed_values() {
    let assert = psv_dump()
        .args(["--input", fixture("accounts.psv").to_str().unwrap(), "--as", "account"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Decoded 3 record(s)"));

    let accounts = parse_lines(&assert.get_output().stdout);
    assert_eq!(accounts.len(), 3);
    assert_eq!(
        accounts[0],
        serde_json::json!({
            "AccountID": "ACC-001",
            "AccountNumber": "4000123",
            "PlanID": 12,
            "TranID": 9001,
            "OutstdPrincipal": 1500.25,
            "PlanSegCreateDate": "2021-03-04T05:06:07",
        })
    );
    assert_eq!(accounts[1]["OutstdPrincipal"], 0.5);
    assert_eq!(accounts[2]["PlanSegCreateDate"], "2022-11-30T23:59:59");
}

#[test]
fn test_typed_values_skip_bad_fields() {
    let input = "AccountID | PlanID | TranID | PlanSegCreateDate\nACC-9 | -1 | 5 | yesterday\n";
    let assert = psv_dump().args(["--as", "account"]).write_stdin(input).assert().success();

    let accounts = parse_lines(&assert.get_output().stdout);
    assert_eq!(accounts[0]["AccountID"], "ACC-9");
    assert_eq!(accounts[0]["PlanID"], 0);
    assert_eq!(accounts[0]["TranID"], 5);
    assert_eq!(accounts[0]["PlanSegCreateDate"], "1970-01-01T00:00:00");
}

#[test]
fn test_quoted_value_after_spaces() {
    let assert = psv_dump().write_stdin("A | B\n1 | \"x|y\"\n").assert().success();

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records, vec![serde_json::json!({ "A": "1", "B": "x|y" })]);
}

#[test]
fn test_empty_input() {
    psv_dump()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Decoded 0 record(s)"));
}

// ============================================================================
// Ошибки
// ============================================================================

#[test]
fn test_wide_row_prints_partial_result_and_fails() {
    let assert = psv_dump()
        .args(["--input", fixture("wide_row.psv").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decoded 1 record(s)"))
        .stderr(predicate::str::contains("Wrong number of fields at line 3"));

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records, vec![serde_json::json!({ "Name": "alpha", "Count": "1" })]);
}

#[test]
fn test_missing_input_file() {
    psv_dump()
        .args(["--input", "definitely/not/here.psv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_non_ascii_delimiter_in_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("reader.json");
    fs::write(&config, r#"{ "delimiter": "¦" }"#).unwrap();

    psv_dump()
        .args(["--config", config.to_str().unwrap()])
        .write_stdin("A¦B\n1¦2\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid delimiter"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("reader.json");
    fs::write(&config, "not json").unwrap();

    psv_dump()
        .args(["--config", config.to_str().unwrap()])
        .write_stdin("A\n1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}
