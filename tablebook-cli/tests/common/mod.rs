//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that pin the caller identity
//! - Fixtures for a seeded floor plan with an admin and a customer

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A day far enough ahead that bookings never hit the past-day rule.
#[allow(dead_code)]
pub const FUTURE_DAY: &str = "2099-06-15";

/// Environment variables that would leak the developer's setup into a test.
const SCRUBBED_ENV: [&str; 9] = [
    "TABLEBOOK_LOG_MODE",
    "TABLEBOOK_DATA_DIR",
    "TABLEBOOK_BUSY_TIMEOUT",
    "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "TABLEBOOK_DISABLE_AUTOINIT",
    "TABLEBOOK_USER",
    "TABLEBOOK_ROLE",
    "TABLEBOOK_OUTPUT_FORMAT",
    "TABLEBOOK_SEED_TABLES",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the tablebook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; tablebook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("tablebook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with a scrubbed environment, run from the temp directory.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("tablebook").expect("Failed to find tablebook binary");
        for var in SCRUBBED_ENV {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// A command with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command acting as `user` in `role`.
    pub fn command_as(&self, user: i64, role: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--user")
            .arg(user.to_string())
            .arg("--role")
            .arg(role);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Runs a command with `--format json` and returns the parsed envelope.
    ///
    /// # Panics
    /// Panics if the command fails or prints something other than JSON.
    pub fn json(&self, mut cmd: Command) -> Value {
        let output = cmd.arg("--format").arg("json").output().expect("Failed to run");
        assert!(
            output.status.success(),
            "Command failed: {}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not JSON")
    }

    /// Initializes the database with the default eight seed tables.
    pub fn init_seeded(&self) {
        self.command()
            .arg("--quiet")
            .arg("init")
            .arg("--seed")
            .assert()
            .success();
    }

    /// Adds a user and returns its id.
    pub fn add_user(&self, mut cmd: Command, name: &str, email: &str, admin: bool) -> i64 {
        cmd.arg("add-user").arg("--name").arg(name).arg("--email").arg(email);
        if admin {
            cmd.arg("--admin");
        }
        let body = self.json(cmd);
        body["data"]["id"].as_i64().expect("user id")
    }

    /// Seeded floor plan plus a first admin and one customer: `(admin, customer)`.
    pub fn restaurant(&self) -> (i64, i64) {
        self.init_seeded();
        let admin = self.add_user(self.command(), "Root", "root@example.com", true);
        let customer = self.add_user(
            self.command_as(admin, "admin"),
            "Ada",
            "ada@example.com",
            false,
        );
        (admin, customer)
    }

    /// Id of the table with `number`, looked up as `admin`.
    pub fn table_id(&self, admin: i64, number: u64) -> i64 {
        let mut cmd = self.command_as(admin, "admin");
        cmd.arg("tables");
        let body = self.json(cmd);
        body["data"]
            .as_array()
            .expect("table list")
            .iter()
            .find(|t| t["tableNumber"].as_u64() == Some(number))
            .and_then(|t| t["id"].as_i64())
            .expect("table with that number")
    }

    /// Books `table` for `user` and returns the reservation id.
    pub fn book(&self, user: i64, table: i64, day: &str, slot: &str, guests: u32) -> i64 {
        let mut cmd = self.command_as(user, "customer");
        cmd.arg("book")
            .arg("--table")
            .arg(table.to_string())
            .arg("--date")
            .arg(day)
            .arg("--slot")
            .arg(slot)
            .arg("--guests")
            .arg(guests.to_string());
        let body = self.json(cmd);
        body["data"]["id"].as_i64().expect("reservation id")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
