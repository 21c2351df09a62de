//! User directory queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::user::{NewUser, User, UserId};

use super::connection::{is_unique_violation, Database};
use super::rows::{row_to_user, to_unix_secs};
use super::schema::USER_COLUMNS;

const INSERT_USER: &str = "INSERT INTO users (name, email, role, created_at) VALUES (?, ?, ?, ?)";

impl Database {
    /// Adds a directory entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the email is already registered.
    pub fn insert_user(conn: &Connection, user: &NewUser, now: DateTime<Utc>) -> Result<User> {
        conn.execute(
            INSERT_USER,
            params![user.name, user.email, user.role.as_str(), to_unix_secs(now)],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::invalid("email", format!("'{}' is already registered", user.email))
            } else {
                e.into()
            }
        })?;

        let id = UserId::new(conn.last_insert_rowid());
        Self::get_user(conn, id)?.ok_or_else(|| Error::not_found(format!("user {id}")))
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        Ok(conn.query_row(&sql, [id.value()], row_to_user).optional()?)
    }

    /// Looks up a user by email. The lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let email = email.trim().to_ascii_lowercase();
        Ok(conn.query_row(&sql, [email], row_to_user).optional()?)
    }

    /// Counts directory entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(conn: &Connection) -> Result<usize> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
