//! Table registry administration: create, update and seed.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Actor, NewTable, TableId, TableUpdate};

use super::access::authenticate_admin;
use super::plan::{OperationPlan, PlanAction};

/// Options for registering a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTableOptions {
    /// Who is registering; must be an admin.
    pub actor: Actor,
    /// The table to register.
    pub table: NewTable,
}

/// A table registration plan generator.
pub struct CreateTablePlan {
    options: CreateTableOptions,
}

impl CreateTablePlan {
    /// Creates a new registration planner.
    #[must_use]
    pub const fn new(options: CreateTableOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this registration.
    ///
    /// # Errors
    ///
    /// - [`Error::Forbidden`] unless the caller is an admin
    /// - [`Error::DuplicateTable`] if the number is taken, even by an
    ///   inactive table
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let CreateTableOptions { actor, table } = self.options;
        authenticate_admin(conn, &actor, "add tables")?;

        if Database::get_table_by_number(conn, table.table_number)?.is_some() {
            return Err(Error::DuplicateTable {
                table_number: table.table_number,
            });
        }

        Ok(
            OperationPlan::new(format!("Add table {}", table.table_number))
                .add_action(PlanAction::CreateTable(table)),
        )
    }
}

/// Options for changing a table's capacity or active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateTableOptions {
    /// Who is updating; must be an admin.
    pub actor: Actor,
    /// Table to change.
    pub table_id: TableId,
    /// Fields to change.
    pub update: TableUpdate,
}

/// A table update plan generator.
pub struct UpdateTablePlan {
    options: UpdateTableOptions,
}

impl UpdateTablePlan {
    /// Creates a new update planner.
    #[must_use]
    pub const fn new(options: UpdateTableOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this update.
    ///
    /// Existing reservations are left alone when a table shrinks or is
    /// deactivated; the plan warns about confirmed ones instead.
    ///
    /// # Errors
    ///
    /// - [`Error::Forbidden`] unless the caller is an admin
    /// - [`Error::InvalidInput`] for a zero capacity
    /// - [`Error::NotFound`] if the table does not exist
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let UpdateTableOptions {
            actor,
            table_id,
            update,
        } = self.options;
        authenticate_admin(conn, &actor, "update tables")?;
        update.validate()?;

        let table = Database::get_table(conn, table_id)?
            .ok_or_else(|| Error::not_found(format!("table {table_id}")))?;
        let plan = OperationPlan::new(format!("Update table {}", table.table_number));

        if update.is_empty() {
            return Ok(plan.add_warning("No changes requested"));
        }

        let updated = update.apply(&table);
        let plan = if table.is_active && !updated.is_active {
            plan.add_warning(format!(
                "Table {} will no longer be offered; existing reservations are kept",
                table.table_number
            ))
        } else {
            plan
        };

        Ok(plan.add_action(PlanAction::UpdateTable(updated)))
    }
}

/// Plans creation of seed tables, skipping numbers already registered.
///
/// Seeding is a local setup step run by `init`, so there is no caller to
/// authorize.
///
/// # Errors
///
/// Returns an error if a lookup fails.
pub fn plan_seed_tables(conn: &Connection, seeds: &[NewTable]) -> Result<OperationPlan> {
    let mut plan = OperationPlan::new(format!("Seed {} tables", seeds.len()));
    for seed in seeds {
        if Database::get_table_by_number(conn, seed.table_number)?.is_some() {
            plan = plan.add_warning(format!(
                "Table {} already exists, skipping",
                seed.table_number
            ));
        } else {
            plan = plan.add_action(PlanAction::CreateTable(*seed));
        }
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{add_table, add_user, create_test_database};
    use crate::operations::PlanExecutor;
    use crate::Role;

    #[test]
    fn test_create_requires_admin_and_unique_number() {
        let db = create_test_database();
        let conn = db.connection();
        let admin = add_user(conn, "Root", "root@example.com", Role::Admin);
        let guest = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        add_table(conn, 1, 2);

        let options = |actor, number| CreateTableOptions {
            actor,
            table: NewTable::new(number, 4).unwrap(),
        };

        let err = CreateTablePlan::new(options(Actor::new(guest.id, Role::Customer), 2))
            .build_plan(conn)
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));

        let err = CreateTablePlan::new(options(Actor::new(admin.id, Role::Admin), 1))
            .build_plan(conn)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateTable { table_number: 1 }));

        let plan = CreateTablePlan::new(options(Actor::new(admin.id, Role::Admin), 2))
            .build_plan(conn)
            .unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_update_is_partial() {
        let db = create_test_database();
        let conn = db.connection();
        let admin = add_user(conn, "Root", "root@example.com", Role::Admin);
        let table = add_table(conn, 1, 2);

        let options = UpdateTableOptions {
            actor: Actor::new(admin.id, Role::Admin),
            table_id: table.id,
            update: TableUpdate::default().with_active(false),
        };
        let plan = UpdateTablePlan::new(options).build_plan(conn).unwrap();
        assert_eq!(plan.warnings.len(), 1);
        PlanExecutor::new(conn).execute(&plan).unwrap();

        let stored = Database::get_table(conn, table.id).unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.capacity, 2);
    }

    #[test]
    fn test_update_rejects_zero_capacity_and_unknown_table() {
        let db = create_test_database();
        let conn = db.connection();
        let admin = Actor::new(
            add_user(conn, "Root", "root@example.com", Role::Admin).id,
            Role::Admin,
        );
        let table = add_table(conn, 1, 2);

        let zero = UpdateTableOptions {
            actor: admin,
            table_id: table.id,
            update: TableUpdate::default().with_capacity(0),
        };
        assert!(matches!(
            UpdateTablePlan::new(zero).build_plan(conn).unwrap_err(),
            Error::InvalidInput { .. }
        ));

        let missing = UpdateTableOptions {
            actor: admin,
            table_id: TableId::new(77),
            update: TableUpdate::default().with_capacity(4),
        };
        assert!(matches!(
            UpdateTablePlan::new(missing).build_plan(conn).unwrap_err(),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn test_seed_skips_existing_numbers() {
        let db = create_test_database();
        let conn = db.connection();
        add_table(conn, 2, 8);

        let seeds = [
            NewTable::new(1, 2).unwrap(),
            NewTable::new(2, 2).unwrap(),
            NewTable::new(3, 4).unwrap(),
        ];
        let plan = plan_seed_tables(conn, &seeds).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.warnings.len(), 1);

        PlanExecutor::new(conn).execute(&plan).unwrap();
        let numbers: Vec<u32> = Database::list_tables(conn, false)
            .unwrap()
            .iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(Database::get_table_by_number(conn, 2).unwrap().unwrap().capacity, 8);
    }
}
