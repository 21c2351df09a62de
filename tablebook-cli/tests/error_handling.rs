//! Integration tests for error handling and exit codes.
//!
//! These tests verify that tablebook returns the documented exit codes:
//! - Exit code 0: Success
//! - Exit code 1: A booking rule rejected the request
//! - Exit code 2: Timeout (SQLite busy)
//! - Exit code 3: No database and auto-init disabled
//! - Exit code 4: Invalid arguments or input
//! - Exit code 7: Configuration error
//! - Exit code 8: Record not found
//! - Exit code 9: Caller unknown or not allowed

mod common;

use common::{TestEnv, FUTURE_DAY};
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.command().arg("init").assert().code(0);
    env.command()
        .args(["available", "--date", FUTURE_DAY, "--slot", "6:00 PM", "--guests", "2"])
        .assert()
        .code(0);
}

#[test]
fn test_missing_subcommand_is_invalid_arguments() {
    let env = TestEnv::new();
    env.command_bare()
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_flag_is_invalid_arguments() {
    let env = TestEnv::new();
    env.command()
        .args(["tables", "--no-such-flag"])
        .assert()
        .code(4);
}

#[test]
fn test_disabled_autoinit_without_database() {
    let env = TestEnv::new();
    env.command()
        .arg("--disable-autoinit")
        .args(["available", "--date", FUTURE_DAY, "--slot", "6:00 PM", "--guests", "2"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tablebook init"));
    assert!(!env.data_dir.join("tablebook.db").exists());
}

#[test]
fn test_disable_autoinit_from_config_file() {
    let env = TestEnv::new();
    fs::write(env.path().join("tablebook.yaml"), "disable_autoinit: true\n").unwrap();
    env.command()
        .args(["available", "--date", FUTURE_DAY, "--slot", "6:00 PM", "--guests", "2"])
        .assert()
        .code(3);
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    fs::write(env.path().join("tablebook.yaml"), "no_such_key: 1\n").unwrap();
    env.command()
        .args(["available", "--date", FUTURE_DAY, "--slot", "6:00 PM", "--guests", "2"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("tablebook.yaml"));
}

#[test]
fn test_invalid_environment_override() {
    let env = TestEnv::new();
    env.command()
        .env("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "soon")
        .args(["available", "--date", FUTURE_DAY, "--slot", "6:00 PM", "--guests", "2"])
        .assert()
        .code(7);
}

#[test]
fn test_lock_timeout() {
    let env = TestEnv::new();
    let (admin, customer) = env.restaurant();
    let table = env.table_id(admin, 3);

    // Hold the write lock from another connection.
    let conn = Connection::open(env.data_dir.join("tablebook.db")).unwrap();
    conn.execute_batch("BEGIN IMMEDIATE").unwrap();

    env.command_as(customer, "customer")
        .args(["--busy-timeout", "1"])
        .args(["book", "--table", &table.to_string(), "--date", FUTURE_DAY])
        .args(["--slot", "6:00 PM", "--guests", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Timeout"));

    conn.execute_batch("ROLLBACK").unwrap();
}

#[test]
fn test_json_errors_use_the_envelope() {
    let env = TestEnv::new();
    let (_, customer) = env.restaurant();

    let output = env
        .command_as(customer, "customer")
        .args(["show-reservation", "77", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(8));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 404);
    assert!(body["message"].as_str().unwrap().contains("reservation 77"));
}

#[test]
fn test_malformed_arguments_use_the_envelope() {
    let env = TestEnv::new();
    let output = env
        .command_as(1, "customer")
        .args(["--format", "json", "book", "--table", "1", "--date", FUTURE_DAY])
        .args(["--slot", "5:00 PM", "--guests", "2"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("5:00 PM"));
}

#[test]
fn test_malformed_arguments_envelope_from_environment() {
    let env = TestEnv::new();
    let output = env
        .command()
        .env("TABLEBOOK_OUTPUT_FORMAT", "json")
        .args(["available", "--date", "2099-13-45", "--slot", "6:00 PM", "--guests", "2"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("2099-13-45"));
}

#[test]
fn test_malformed_arguments_stay_plain_without_json() {
    let env = TestEnv::new();
    env.command()
        .args(["available", "--date", FUTURE_DAY, "--slot", "5:00 PM", "--guests", "2"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--slot"));
}

#[test]
fn test_validate_command() {
    let env = TestEnv::new();
    let good = env.path().join("good.yaml");
    fs::write(&good, "output_format: csv\nmaximum_lock_wait_seconds: 3\n").unwrap();
    env.command()
        .arg("validate")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    let duplicate = env.path().join("duplicate.yaml");
    fs::write(
        &duplicate,
        "seed_tables:\n  - number: 1\n    capacity: 2\n  - number: 1\n    capacity: 4\n",
    )
    .unwrap();
    env.command().arg("validate").arg(&duplicate).assert().code(7);

    env.command()
        .arg("validate")
        .arg(env.path().join("missing.yaml"))
        .assert()
        .code(4);
}
