//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the tablebook library against a real on-disk database.

use std::path::Path;

use chrono::Utc;
use tablebook::database::{Database, DatabaseConfig};
use tablebook::{Actor, CalendarDay, NewTable, NewUser, Role, Table, User};

/// Opens (creating if needed) the database inside `dir`.
#[allow(dead_code)]
pub fn open_database(dir: &Path) -> Database {
    Database::open(DatabaseConfig::new(dir.join("tablebook.db"))).unwrap()
}

/// Creates a temporary test database.
///
/// The `TempDir` is returned alongside so the file outlives the test body.
#[allow(dead_code)]
pub fn create_test_database() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(dir.path());
    (dir, db)
}

/// Registers a table directly in the store.
#[allow(dead_code)]
pub fn add_table(db: &Database, number: u32, capacity: u32) -> Table {
    let table = NewTable::new(number, capacity).unwrap();
    Database::insert_table(db.connection(), &table, Utc::now()).unwrap()
}

/// Adds a user directly in the store and returns the matching actor.
#[allow(dead_code)]
pub fn add_actor(db: &Database, email: &str, role: Role) -> Actor {
    let user = NewUser::new("Guest", email, role).unwrap();
    let user: User = Database::insert_user(db.connection(), &user, Utc::now()).unwrap();
    Actor::new(user.id, role)
}

/// Shorthand for a calendar day.
#[allow(dead_code)]
pub fn day(year: i32, month: u32, d: u32) -> CalendarDay {
    CalendarDay::from_ymd(year, month, d).unwrap()
}
