//! Integration tests for error handling and exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Refusal (conflict, not owner, unauthorized, inactive award)
//! - Exit code 2: Timeout (store busy) or clap usage error
//! - Exit code 3: No data directory found
//! - Exit code 4: Invalid arguments
//! - Exit code 6: Other library errors
//! - Exit code 7: Configuration error

mod common;

use common::{TestEnv, AWARD};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::station();
    env.block("EA1AAA", "20m", "CW").code(0);
    env.command().arg("list").assert().code(0);
}

#[test]
fn test_conflict_exit_code() {
    let env = TestEnv::station();
    env.block("EA1AAA", "20m", "CW").success();
    env.block("EA1BBB", "20m", "CW")
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_missing_operator_identity_exit_code() {
    let env = TestEnv::station();
    env.command()
        .args(["block", "--award", AWARD, "20m", "CW"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--as"));
}

#[test]
fn test_malformed_callsign_exit_code() {
    let env = TestEnv::station();
    env.as_operator("EA1 AAA")
        .args(["block", "--award", AWARD, "20m", "CW"])
        .assert()
        .code(4);
}

#[test]
fn test_unknown_operator_exit_code() {
    let env = TestEnv::station();
    env.block("EA9ZZZ", "20m", "CW")
        .code(6)
        .stderr(predicate::str::contains("EA9ZZZ"));
}

#[test]
fn test_unknown_award_exit_code() {
    let env = TestEnv::station();
    env.as_operator("EA1AAA")
        .args(["block", "--award", "NOSUCH", "20m", "CW"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("not found"));

    env.as_operator("EA1AAA")
        .args(["block", "--award", "999", "20m", "CW"])
        .assert()
        .code(6);
}

#[test]
fn test_no_data_directory_exit_code() {
    let env = TestEnv::new();
    env.command()
        .args(["--disable-autoinit", "list"])
        .assert()
        .code(3);
    assert!(!env.data_dir.exists());
}

#[test]
fn test_invalid_config_exit_code() {
    let env = TestEnv::new();
    fs::write(env.path().join("quend.yaml"), "bands: []\n").unwrap();
    env.command().arg("list").assert().code(7);
}

#[test]
fn test_invalid_yaml_exit_code() {
    let env = TestEnv::new();
    fs::write(env.path().join("quend.yaml"), "bands: [20m\n").unwrap();
    env.command()
        .arg("list")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Invalid YAML"));
}

#[test]
fn test_store_timeout_exit_code() {
    let env = TestEnv::station();

    // Hold the write lock from another connection for longer than the wait
    let conn = rusqlite::Connection::open(env.data_dir.join("quend.db")).unwrap();
    conn.execute_batch("BEGIN IMMEDIATE").unwrap();

    env.as_operator("EA1AAA")
        .args(["--busy-timeout", "1", "block", "--award", AWARD, "20m", "CW"])
        .assert()
        .code(2);

    conn.execute_batch("ROLLBACK").unwrap();
    env.block("EA1AAA", "20m", "CW").success();
}

#[test]
fn test_validate_command() {
    let env = TestEnv::new();
    let good = env.path().join("good.yaml");
    fs::write(&good, "bands: [20m, 40m]\nmodes: [CW]\n").unwrap();
    env.command_bare()
        .arg("validate")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 bands x 1 modes"));

    let bad = env.path().join("bad.yaml");
    fs::write(&bad, "modes: [CW, cw]\n").unwrap();
    env.command_bare()
        .arg("validate")
        .arg(&bad)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Validation error"));

    env.command_bare()
        .arg("validate")
        .arg(env.path().join("missing.yaml"))
        .assert()
        .code(4);
}
