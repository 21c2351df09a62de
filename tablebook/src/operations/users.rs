//! User directory administration.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Actor, NewUser, Role};

use super::access::authenticate_admin;
use super::plan::{OperationPlan, PlanAction};

/// Options for adding a directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddUserOptions {
    /// Who is adding; `None` is only accepted for the very first user.
    pub actor: Option<Actor>,
    /// The entry to add.
    pub user: NewUser,
}

/// A directory entry plan generator.
pub struct AddUserPlan {
    options: AddUserOptions,
}

impl AddUserPlan {
    /// Creates a new planner.
    #[must_use]
    pub const fn new(options: AddUserOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for adding the user.
    ///
    /// An empty directory accepts its first entry from anyone, so a fresh
    /// install can create its admin.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthenticated`] if no caller is given once the
    ///   directory has entries
    /// - [`Error::Forbidden`] unless the caller is an admin
    /// - [`Error::InvalidInput`] if the email is already registered
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let user = &self.options.user;
        let mut plan = OperationPlan::new(format!("Add user {}", user.email));

        if Database::count_users(conn)? == 0 {
            plan = plan.add_warning("User directory is empty; adding the first user");
            if user.role != Role::Admin {
                plan = plan.add_warning("The first user is not an admin");
            }
        } else {
            let actor = self.options.actor.ok_or_else(|| Error::Unauthenticated {
                details: "a user id is required".into(),
            })?;
            authenticate_admin(conn, &actor, "add users")?;
        }

        if Database::get_user_by_email(conn, &user.email)?.is_some() {
            return Err(Error::invalid(
                "email",
                format!("'{}' is already registered", user.email),
            ));
        }

        Ok(plan.add_action(PlanAction::CreateUser(user.clone())))
    }
}
