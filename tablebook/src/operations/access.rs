//! Caller identification against the user directory.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Actor, Role, User};

/// Resolves the caller to a directory entry.
///
/// An actor claiming the admin role must be stored as admin. A stored admin
/// acting as a customer is allowed and gets customer rights.
///
/// # Errors
///
/// - [`Error::Unauthenticated`] if the user id is not in the directory.
/// - [`Error::Forbidden`] if the admin claim does not match the record.
pub fn authenticate(conn: &Connection, actor: &Actor) -> Result<User> {
    let user = Database::get_user(conn, actor.user_id)?.ok_or_else(|| Error::Unauthenticated {
        details: format!("unknown user {}", actor.user_id),
    })?;

    if actor.role == Role::Admin && user.role != Role::Admin {
        return Err(Error::forbidden(format!(
            "user {} is not an admin",
            actor.user_id
        )));
    }

    Ok(user)
}

/// Resolves the caller and requires admin rights for `action`.
///
/// # Errors
///
/// As [`authenticate`], plus [`Error::Forbidden`] for non-admin actors.
pub fn authenticate_admin(conn: &Connection, actor: &Actor, action: &str) -> Result<User> {
    let user = authenticate(conn, actor)?;
    actor.require_admin(action)?;
    Ok(user)
}
