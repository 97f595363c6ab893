//! Integration tests for the quend CLI.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

fn quend() -> Command {
    Command::cargo_bin("quend").expect("Failed to find quend binary")
}

/// Test that the binary runs without arguments and displays help/error.
#[test]
fn test_cli_no_arguments() {
    quend()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    quend()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quend"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag lists the reservation commands.
#[test]
fn test_cli_help_flag() {
    quend()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("block"))
        .stdout(predicate::str::contains("unblock"))
        .stdout(predicate::str::contains("force-release"))
        .stdout(predicate::str::contains("occupancy"));
}

/// Test that block without band and mode is a usage error.
#[test]
fn test_block_requires_band_and_mode() {
    quend()
        .args(["block", "--award", "1", "20m"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

/// Test that an invalid subcommand produces an error.
#[test]
fn test_cli_invalid_subcommand() {
    quend()
        .arg("reserve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

/// Test that completions are generated for bash.
#[test]
fn test_completions_bash() {
    quend()
        .args(["--quiet", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quend"));
}
