//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! for the tablebook store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the tables registry.
///
/// `table_number` is unique across active and inactive tables alike.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        table_number INTEGER NOT NULL UNIQUE CHECK (table_number > 0),
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the user directory.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL CHECK (role IN ('customer', 'admin')),
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// `date` holds the `YYYY-MM-DD` day key and `time_slot` the slot ordinal.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        table_id INTEGER NOT NULL REFERENCES tables(id),
        date TEXT NOT NULL,
        time_slot INTEGER NOT NULL CHECK (time_slot BETWEEN 0 AND 8),
        number_of_guests INTEGER NOT NULL CHECK (number_of_guests > 0),
        status TEXT NOT NULL CHECK (status IN ('confirmed', 'cancelled')),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// At most one confirmed reservation per table, day and slot.
///
/// A violation of this index is reported as a booking conflict.
pub const CREATE_CONFIRMED_SLOT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_confirmed_slot
    ON reservations(table_id, date, time_slot)
    WHERE status = 'confirmed'";

/// SQL statement to create an index for availability and by-date lookups.
pub const CREATE_DATE_SLOT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_date_slot ON reservations(date, time_slot, status)";

/// SQL statement to create an index for per-user listings.
pub const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Columns selected for a [`crate::Table`], in `row_to_table` order.
pub const TABLE_COLUMNS: &str = "id, table_number, capacity, is_active, created_at, updated_at";

/// Columns selected for a [`crate::User`], in `row_to_user` order.
pub const USER_COLUMNS: &str = "id, name, email, role, created_at";

/// Reservation columns plus the joined table and user, in
/// `row_to_details` order.
pub const DETAILS_SELECT: &str = r"
    SELECT r.id, r.user_id, r.table_id, r.date, r.time_slot, r.number_of_guests,
           r.status, r.created_at, r.updated_at,
           t.table_number, t.capacity,
           u.name, u.email
    FROM reservations r
    JOIN tables t ON t.id = r.table_id
    LEFT JOIN users u ON u.id = r.user_id
";
