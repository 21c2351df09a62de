//! Database layer for persistent storage of tables, users and reservations.
//!
//! This module provides a SQLite-based store shared by every process that
//! books against the same data directory: connection management, schema
//! versioning, and the queries behind the table registry, the user
//! directory and the reservation ledger.
//!
//! Query functions take a `&Connection` so they work the same on a plain
//! connection and inside a [`rusqlite::Transaction`].
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::database::{Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
//!
//! for table in Database::list_tables(db.connection(), true).unwrap() {
//!     println!("table {} seats {}", table.table_number, table.capacity);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod reservations;
mod rows;
mod schema;
mod tables;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;
mod users;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub(crate) use connection::lock_error;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
