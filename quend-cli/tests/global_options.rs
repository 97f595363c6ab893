//! Integration tests for global CLI options.
//!
//! - `--verbose` / `--quiet`
//! - `--data-dir` and `QUEND_DATA_DIR`
//! - `--as` and `QUEND_OPERATOR`
//! - `--disable-autoinit` and `QUEND_DISABLE_AUTOINIT`
//! - Configuration layering through files and `QUEND_*` variables

mod common;

use common::{TestEnv, AWARD};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_verbose_flag_logs_debug_output() {
    let env = TestEnv::station();
    env.as_operator("EA1AAA")
        .args(["--verbose", "block", "--award", AWARD, "20m", "CW"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_quiet_flag_suppresses_output() {
    let env = TestEnv::station();
    env.as_operator("EA1AAA")
        .args(["--quiet", "block", "--award", AWARD, "20m", "CW"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_data_dir_isolation() {
    let env = TestEnv::station();
    env.block("EA1AAA", "20m", "CW").success();

    let other = env.path().join("other-data");
    env.command_bare()
        .arg("--data-dir")
        .arg(&other)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_data_dir_from_environment() {
    let env = TestEnv::station();
    env.block("EA1AAA", "20m", "CW").success();

    env.command_bare()
        .env("QUEND_DATA_DIR", &env.data_dir)
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains(env.data_dir.to_str().unwrap()));

    env.command_bare()
        .env("QUEND_DATA_DIR", &env.data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("EA1AAA"));
}

#[test]
fn test_operator_from_environment() {
    let env = TestEnv::station();
    env.command()
        .env("QUEND_OPERATOR", "EA1AAA")
        .env("QUEND_AWARD", AWARD)
        .args(["block", "20m", "CW"])
        .assert()
        .success();
    assert_eq!(env.reservations()[0]["operator"], "EA1AAA");
}

#[test]
fn test_disable_autoinit_from_environment() {
    let env = TestEnv::new();
    env.command()
        .env("QUEND_DISABLE_AUTOINIT", "true")
        .arg("stats")
        .assert()
        .code(3);

    // Autoinit is the default
    env.command().arg("stats").assert().success();
    assert!(env.data_dir.join("quend.db").exists());
}

#[test]
fn test_disable_autoinit_from_user_config() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "disable_autoinit: true\n").unwrap();

    env.command().arg("stats").assert().code(3);
}

#[test]
fn test_deployment_config_restricts_catalog() {
    let env = TestEnv::station();
    fs::write(
        env.path().join("quend.yaml"),
        "bands: [20m, 40m]\nmodes: [CW, SSB]\n",
    )
    .unwrap();

    env.block("EA1AAA", "15m", "CW").failure().code(1);
    env.block("EA1AAA", "40m", "ssb").success();
}

#[test]
fn test_environment_overrides_files() {
    let env = TestEnv::station();
    fs::write(env.path().join("quend.yaml"), "modes: [CW]\n").unwrap();

    env.as_operator("EA1AAA")
        .env("QUEND_MODES", "CW, SSB, DMR")
        .args(["block", "--award", AWARD, "2m", "dmr"])
        .assert()
        .success();

    env.block("EA1BBB", "2m", "SSB").failure().code(1);
}

#[test]
fn test_deployment_config_found_from_subdirectory() {
    let env = TestEnv::station();
    fs::write(env.path().join("quend.yaml"), "bands: [20m]\n").unwrap();
    let nested = env.path().join("logs").join("today");
    fs::create_dir_all(&nested).unwrap();

    env.as_operator("EA1AAA")
        .current_dir(&nested)
        .args(["block", "--award", AWARD, "40m", "CW"])
        .assert()
        .failure()
        .code(1);
}
