//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{ReservationId, ReservationStatus, TableId, UserId};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation created or changed, if any.
    ///
    /// A dry-run booking has no id yet and leaves this empty.
    pub reservation_id: Option<ReservationId>,

    /// Tables created or updated, in plan order.
    pub table_ids: Vec<TableId>,

    /// The user created, if any.
    pub user_id: Option<UserId>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            ..Self::default()
        }
    }
}

/// Executes operation plans against a connection or open transaction.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting what would change).
///
/// # Examples
///
/// ```no_run
/// use tablebook::operations::{OperationPlan, PlanAction, PlanExecutor};
/// use tablebook::{Database, DatabaseConfig, NewTable};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
/// let plan = OperationPlan::new("Add table 1")
///     .add_action(PlanAction::CreateTable(NewTable::new(1, 4).unwrap()));
///
/// let tx = db.begin_transaction().unwrap();
/// let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert_eq!(result.table_ids.len(), 1);
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
    now: DateTime<Utc>,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor stamping changes with the current time.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
            now: Utc::now(),
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but does not
    /// modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Overrides the timestamp written to created and updated rows.
    #[must_use]
    pub const fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Executes the given plan.
    ///
    /// Actions run in order. Callers that need all-or-nothing behavior
    /// pass a transaction and commit only on success.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::from_plan(plan, self.dry_run);

        if self.dry_run {
            for action in &plan.actions {
                match action {
                    PlanAction::CancelReservation(id) => result.reservation_id = Some(*id),
                    PlanAction::UpdateReservation(r) => result.reservation_id = Some(r.id),
                    PlanAction::UpdateTable(t) => result.table_ids.push(t.id),
                    PlanAction::CreateTable(_)
                    | PlanAction::CreateUser(_)
                    | PlanAction::CreateReservation(_) => {}
                }
            }
            return Ok(result);
        }

        for action in &plan.actions {
            log::debug!("executing: {}", action.description());
            self.execute_action(action, &mut result)?;
        }

        log::info!("{} ({} actions)", plan.description, plan.len());
        Ok(result)
    }

    fn execute_action(&self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::CreateTable(new) => {
                let table = Database::insert_table(self.conn, new, self.now)?;
                result.table_ids.push(table.id);
            }
            PlanAction::UpdateTable(table) => {
                let mut table = table.clone();
                table.updated_at = self.now;
                if !Database::store_table(self.conn, &table)? {
                    return Err(Error::not_found(format!("table {}", table.id)));
                }
                result.table_ids.push(table.id);
            }
            PlanAction::CreateUser(new) => {
                let user = Database::insert_user(self.conn, new, self.now)?;
                result.user_id = Some(user.id);
            }
            PlanAction::CreateReservation(new) => {
                let id = Database::insert_reservation(self.conn, new)?;
                result.reservation_id = Some(id);
            }
            PlanAction::CancelReservation(id) => {
                if !Database::set_reservation_status(
                    self.conn,
                    *id,
                    ReservationStatus::Cancelled,
                    self.now,
                )? {
                    return Err(Error::not_found(format!("reservation {id}")));
                }
                result.reservation_id = Some(*id);
            }
            PlanAction::UpdateReservation(reservation) => {
                let mut reservation = reservation.clone();
                reservation.updated_at = self.now;
                if !Database::store_reservation(self.conn, &reservation)? {
                    return Err(Error::not_found(format!("reservation {}", reservation.id)));
                }
                result.reservation_id = Some(reservation.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{add_table, add_user, create_test_database, day};
    use crate::{NewReservation, NewTable, Role, TimeSlot};

    #[test]
    fn test_dry_run_changes_nothing() {
        let db = create_test_database();
        let conn = db.connection();
        let plan = OperationPlan::new("Add tables")
            .add_action(PlanAction::CreateTable(NewTable::new(1, 2).unwrap()))
            .add_action(PlanAction::CreateTable(NewTable::new(2, 4).unwrap()));

        let result = PlanExecutor::new(conn).dry_run().execute(&plan).unwrap();

        assert!(result.success);
        assert!(result.dry_run);
        assert_eq!(result.actions_taken.len(), 2);
        assert!(result.table_ids.is_empty());
        assert_eq!(Database::count_tables(conn).unwrap(), 0);
    }

    #[test]
    fn test_execute_reports_created_ids() {
        let db = create_test_database();
        let conn = db.connection();
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let table = add_table(conn, 1, 4);
        let booking = NewReservation::builder(user.id, table.id, day(2025, 1, 20), TimeSlot::SixPm)
            .number_of_guests(2)
            .build()
            .unwrap();

        let plan = OperationPlan::new("Book").add_action(PlanAction::CreateReservation(booking));
        let result = PlanExecutor::new(conn).execute(&plan).unwrap();

        let id = result.reservation_id.unwrap();
        assert!(Database::get_reservation(conn, id).unwrap().is_some());
    }

    #[test]
    fn test_cancel_missing_reservation_is_not_found() {
        let db = create_test_database();
        let plan = OperationPlan::new("Cancel")
            .add_action(PlanAction::CancelReservation(ReservationId::new(404)));

        let err = PlanExecutor::new(db.connection())
            .execute(&plan)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_update_table_stamps_time() {
        let db = create_test_database();
        let conn = db.connection();
        let table = add_table(conn, 1, 4);
        let later = table.updated_at + chrono::Duration::hours(1);

        let mut changed = table.clone();
        changed.capacity = 6;
        let plan = OperationPlan::new("Resize").add_action(PlanAction::UpdateTable(changed));
        PlanExecutor::new(conn).at(later).execute(&plan).unwrap();

        let stored = Database::get_table(conn, table.id).unwrap().unwrap();
        assert_eq!(stored.capacity, 6);
        assert_eq!(stored.updated_at, later);
    }
}
