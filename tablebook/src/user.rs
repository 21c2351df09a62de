//! Callers and the user directory.
//!
//! Registration and login happen elsewhere. This crate keeps only what
//! the reservation views need (name and email) and the role used for
//! authorization.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::ValidationError;

/// Opaque identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "user_id".into(),
                message: format!("'{s}' is not a user id"),
            })
    }
}

/// Authorization role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Books and manages their own reservations.
    #[default]
    Customer,
    /// Manages tables and every reservation.
    Admin,
}

impl Role {
    /// Stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "user" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(ValidationError {
                field: "role".into(),
                message: format!("'{s}' is not a role (expected customer or admin)"),
            }),
        }
    }
}

/// The authenticated identity a request is made under.
///
/// # Examples
///
/// ```
/// use tablebook::{Actor, Role, UserId};
///
/// let admin = Actor::new(UserId::new(1), Role::Admin);
/// assert!(admin.require_admin("list tables").is_ok());
///
/// let guest = Actor::new(UserId::new(2), Role::Customer);
/// assert!(guest.require_admin("list tables").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Who is calling.
    pub user_id: UserId,
    /// Which role they act in.
    pub role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// True when acting as admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Fails with `Forbidden` unless acting as admin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] for non-admin actors.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden(format!("only admins may {action}")))
        }
    }

    /// True when this actor may act on a record owned by `owner`.
    #[must_use]
    pub fn may_access(&self, owner: UserId) -> bool {
        self.is_admin() || self.user_id == owner
    }
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, stored lowercase.
    pub email: String,
    /// Role.
    pub role: Role,
    /// When the entry was added.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The compact form joined onto reservations.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User details attached to a reservation read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// A directory entry about to be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name, trimmed.
    pub name: String,
    /// Email, trimmed and lowercased.
    pub email: String,
    /// Role.
    pub role: Role,
}

impl NewUser {
    /// Validates and normalizes a new directory entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the email is not an address.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{NewUser, Role};
    ///
    /// let user = NewUser::new(" Ada ", "ADA@Example.com", Role::Customer).unwrap();
    /// assert_eq!(user.name, "Ada");
    /// assert_eq!(user.email, "ada@example.com");
    /// assert!(NewUser::new("Ada", "not-an-email", Role::Customer).is_err());
    /// ```
    pub fn new(
        name: &str,
        email: &str,
        role: Role,
    ) -> std::result::Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "name is required".into(),
            });
        }

        let email = email.trim().to_ascii_lowercase();
        if !looks_like_email(&email) {
            return Err(ValidationError {
                field: "email".into(),
                message: format!("'{email}' is not a valid email address"),
            });
        }

        Ok(Self {
            name: name.to_string(),
            email,
            role,
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
