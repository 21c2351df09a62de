//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use chrono::Utc;
use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{CalendarDay, NewTable, NewUser, Role, Table, User};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Registers an active table.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn add_table(conn: &Connection, number: u32, capacity: u32) -> Table {
    Database::insert_table(conn, &NewTable::new(number, capacity).unwrap(), Utc::now()).unwrap()
}

/// Adds a directory entry.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn add_user(conn: &Connection, name: &str, email: &str, role: Role) -> User {
    Database::insert_user(conn, &NewUser::new(name, email, role).unwrap(), Utc::now()).unwrap()
}

/// Shorthand for a valid calendar day.
///
/// # Panics
///
/// Panics on an impossible date.
#[must_use]
pub fn day(year: i32, month: u32, day: u32) -> CalendarDay {
    CalendarDay::from_ymd(year, month, day).unwrap()
}
