//! Integration tests for the svcctl binary
//!
//! Only paths that fail validation are exercised here, so no bus is needed.

use std::process::Command;

use serde_json::Value;

/// Run svcctl and return (process exit code, parsed stdout record)
fn svcctl(args: &[&str]) -> (i32, Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_svcctl"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run svcctl");

    let stdout = String::from_utf8(output.stdout).expect("stdout is not UTF-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "expected one record, got: {stdout}");

    let record: Value = serde_json::from_str(lines[0]).expect("stdout is not JSON");
    (output.status.code().expect("killed by signal"), record)
}

fn assert_record(exit: i32, record: &Value, expected: i64) {
    assert_eq!(i64::from(exit), expected);
    assert_eq!(record["exitCode"], expected);
    assert_eq!(record["success"], expected == 0);
    assert!(record["message"].is_string());
}

#[test]
fn test_invalid_action() {
    let (exit, record) = svcctl(&["--action", "restart", "--service-name", "nginx", "--timeout", "10"]);
    assert_record(exit, &record, 1);
    assert_eq!(
        record["message"],
        "Invalid action 'restart'. Expected 'start' or 'stop'."
    );
}

#[test]
fn test_invalid_action_wins_over_bad_timeout() {
    let (exit, record) = svcctl(&["-a", "pause", "-s", "nginx", "-t", "0"]);
    assert_record(exit, &record, 1);
    assert!(record["message"].as_str().unwrap().contains("pause"));
}

#[test]
fn test_zero_timeout() {
    let (exit, record) = svcctl(&["-a", "start", "-s", "nginx", "-t", "0"]);
    assert_record(exit, &record, 1);
    assert_eq!(record["message"], "Timeout must be at least 1 second (got 0).");
}

#[test]
fn test_negative_timeout() {
    let (exit, record) = svcctl(&["-a", "stop", "-s", "nginx", "-t", "-5"]);
    assert_record(exit, &record, 1);
    assert!(record["message"].as_str().unwrap().contains("-5"));
}

#[test]
fn test_non_numeric_timeout() {
    let (exit, record) = svcctl(&["-a", "stop", "-s", "nginx", "-t", "soon"]);
    assert_record(exit, &record, 1);
    assert!(record["message"].as_str().unwrap().contains("'soon'"));
}

#[test]
fn test_missing_arguments() {
    let (exit, record) = svcctl(&["--action", "start"]);
    assert_record(exit, &record, 1);
    let message = record["message"].as_str().unwrap();
    assert!(message.contains("--service-name"), "{message}");
    assert!(message.contains("--timeout"), "{message}");
}

#[test]
fn test_empty_service_name() {
    let (exit, record) = svcctl(&["-a", "start", "-s", "", "-t", "5"]);
    assert_record(exit, &record, 1);
}
