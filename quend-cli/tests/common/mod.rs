//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - A station fixture with an admin, an award and two operators

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Callsign of the admin every station fixture is initialized with.
#[allow(dead_code)]
pub const ADMIN: &str = "EA1ADM";

/// Name of the award every station fixture creates.
#[allow(dead_code)]
pub const AWARD: &str = "EG90IARU";

/// Environment variables that would leak host settings into a test run.
const SCRUBBED_ENV: [&str; 8] = [
    "QUEND_DATA_DIR",
    "QUEND_OPERATOR",
    "QUEND_AWARD",
    "QUEND_BANDS",
    "QUEND_MODES",
    "QUEND_DISABLE_AUTOINIT",
    "QUEND_BUSY_TIMEOUT",
    "QUEND_OUTPUT_FORMAT",
];

/// Test environment with isolated data directory.
///
/// Commands run with the temporary directory as working directory so no
/// `quend.yaml` from the host is discovered.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the quend data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; quend creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("quend-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Create an environment with an initialized database, the admin
    /// [`ADMIN`], the award [`AWARD`] and the operators EA1AAA and EA1BBB.
    pub fn station() -> Self {
        let env = Self::new();
        env.command()
            .args(["init", "--admin", ADMIN, "--admin-name", "Station Admin"])
            .assert()
            .success();
        env.as_admin()
            .args(["award", "create", AWARD, "--description", "IARU HQ"])
            .assert()
            .success();
        env.add_operator("EA1AAA", "Ana");
        env.add_operator("EA1BBB", "Bruno");
        env
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Host `QUEND_*` variables are removed so tests control every input.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("quend").expect("Failed to find quend binary");
        cmd.current_dir(&self.temp_path);
        for var in SCRUBBED_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get a command builder acting as `callsign`.
    pub fn as_operator(&self, callsign: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--as").arg(callsign);
        cmd
    }

    /// Get a command builder acting as the fixture admin.
    pub fn as_admin(&self) -> Command {
        self.as_operator(ADMIN)
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Register an operator through the admin.
    pub fn add_operator(&self, callsign: &str, name: &str) {
        self.as_admin()
            .args(["operator", "add", callsign, name])
            .assert()
            .success();
    }

    /// Block `band`/`mode` in the fixture award as `callsign`.
    pub fn block(&self, callsign: &str, band: &str, mode: &str) -> assert_cmd::assert::Assert {
        self.as_operator(callsign)
            .args(["block", "--award", AWARD, band, mode])
            .assert()
    }

    /// Run `list` in the given format and return stdout.
    pub fn list(&self, format: &str) -> String {
        let output = self
            .command()
            .args(["list", "--format", format])
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Return the active reservations as parsed JSON.
    pub fn reservations(&self) -> Vec<serde_json::Value> {
        serde_json::from_str(&self.list("json")).expect("list --format json is not valid JSON")
    }
}
