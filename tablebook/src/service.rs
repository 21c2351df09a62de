//! Request-level entry points over plans, transactions and queries.
//!
//! Every mutating request runs plan and execute inside one IMMEDIATE
//! transaction. Read-only requests go straight to the connection.

use rusqlite::Connection;

use crate::availability::{find_available, AvailabilityQuery};
use crate::clock::Clock;
use crate::database::{lock_error, Database};
use crate::error::{Error, Result};
use crate::operations::{
    authenticate, authenticate_admin, AddUserOptions, AddUserPlan, BookOptions, BookPlan,
    CancelOptions, CancelPlan, CreateTableOptions, CreateTablePlan, EditReservationOptions,
    EditReservationPlan, ExecutionResult, OperationPlan, PlanExecutor, UpdateTableOptions,
    UpdateTablePlan,
};
use crate::{Actor, CalendarDay, ReservationDetails, ReservationId, Table, User};

/// What a mutating request did.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    /// Actions and warnings from the executed plan.
    pub execution: ExecutionResult,
    /// The record as stored afterwards; `None` for a dry run.
    pub record: Option<T>,
}

/// Reservation system front door for one caller session.
///
/// # Examples
///
/// ```no_run
/// use tablebook::availability::AvailabilityQuery;
/// use tablebook::service::ReservationService;
/// use tablebook::{Database, DatabaseConfig, SystemClock, TimeSlot};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
/// let service = ReservationService::new(&mut db, &SystemClock);
/// let query = AvailabilityQuery::new("2099-02-14".parse().unwrap(), TimeSlot::EightPm, 2);
/// for table in service.find_available(&query).unwrap() {
///     println!("table {} seats {}", table.table_number, table.capacity);
/// }
/// ```
pub struct ReservationService<'a> {
    db: &'a mut Database,
    clock: &'a dyn Clock,
    dry_run: bool,
}

impl<'a> ReservationService<'a> {
    /// Creates a service over an open database.
    pub fn new(db: &'a mut Database, clock: &'a dyn Clock) -> Self {
        Self {
            db,
            clock,
            dry_run: false,
        }
    }

    /// Plans and validates mutating requests without writing anything.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    fn conn(&self) -> &Connection {
        self.db.connection()
    }

    fn apply<T>(
        &mut self,
        plan: impl FnOnce(&Connection) -> Result<OperationPlan>,
        fetch: impl FnOnce(&Connection, &ExecutionResult) -> Result<Option<T>>,
    ) -> Result<Outcome<T>> {
        let seconds = self.db.config().busy_timeout.as_secs();
        let dry_run = self.dry_run;
        let tx = self.db.begin_transaction()?;

        let plan = plan(&tx)?;
        for warning in &plan.warnings {
            log::warn!("{warning}");
        }

        let mut executor = PlanExecutor::new(&tx);
        if dry_run {
            executor = executor.dry_run();
        }
        let execution = executor.execute(&plan)?;

        if dry_run {
            return Ok(Outcome {
                execution,
                record: None,
            });
        }

        let record = fetch(&tx, &execution)?;
        tx.commit().map_err(|e| lock_error(e.into(), seconds))?;
        log::info!("{}", plan.description);
        Ok(Outcome { execution, record })
    }

    /// Lists active tables that can seat the party and are free in the slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty party.
    pub fn find_available(&self, query: &AvailabilityQuery) -> Result<Vec<Table>> {
        find_available(self.conn(), query)
    }

    /// Books a table; see [`BookPlan::build_plan`] for the checks.
    ///
    /// # Errors
    ///
    /// Any error from [`BookPlan::build_plan`]; [`Error::Conflict`] also
    /// covers a booking that lost a race for the slot.
    pub fn book(&mut self, options: BookOptions) -> Result<Outcome<ReservationDetails>> {
        let clock = self.clock;
        self.apply(
            |conn| BookPlan::new(options, clock).build_plan(conn),
            |conn, result| match result.reservation_id {
                Some(id) => Database::get_reservation_details(conn, id),
                None => Ok(None),
            },
        )
    }

    /// Cancels a reservation for its owner or an admin.
    ///
    /// # Errors
    ///
    /// Any error from [`CancelPlan::build_plan`].
    pub fn cancel(&mut self, options: CancelOptions) -> Result<Outcome<ReservationDetails>> {
        let id = options.reservation_id;
        self.apply(
            |conn| CancelPlan::new(options).build_plan(conn),
            |conn, _| Database::get_reservation_details(conn, id),
        )
    }

    /// Applies an admin edit.
    ///
    /// # Errors
    ///
    /// Any error from [`EditReservationPlan::build_plan`].
    pub fn edit_reservation(
        &mut self,
        options: EditReservationOptions,
    ) -> Result<Outcome<ReservationDetails>> {
        let id = options.reservation_id;
        self.apply(
            |conn| EditReservationPlan::new(options).build_plan(conn),
            |conn, _| Database::get_reservation_details(conn, id),
        )
    }

    /// Registers a table.
    ///
    /// # Errors
    ///
    /// Any error from [`CreateTablePlan::build_plan`].
    pub fn create_table(&mut self, options: CreateTableOptions) -> Result<Outcome<Table>> {
        self.apply(
            |conn| CreateTablePlan::new(options).build_plan(conn),
            |conn, result| match result.table_ids.first() {
                Some(&id) => Database::get_table(conn, id),
                None => Ok(None),
            },
        )
    }

    /// Changes a table's capacity or active flag.
    ///
    /// # Errors
    ///
    /// Any error from [`UpdateTablePlan::build_plan`].
    pub fn update_table(&mut self, options: UpdateTableOptions) -> Result<Outcome<Table>> {
        let id = options.table_id;
        self.apply(
            |conn| UpdateTablePlan::new(options).build_plan(conn),
            |conn, _| Database::get_table(conn, id),
        )
    }

    /// Adds a user directory entry.
    ///
    /// # Errors
    ///
    /// Any error from [`AddUserPlan::build_plan`].
    pub fn add_user(&mut self, options: AddUserOptions) -> Result<Outcome<User>> {
        self.apply(
            |conn| AddUserPlan::new(options).build_plan(conn),
            |conn, result| match result.user_id {
                Some(id) => Database::get_user(conn, id),
                None => Ok(None),
            },
        )
    }

    /// The caller's own reservations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] for an unknown caller.
    pub fn my_reservations(&self, actor: &Actor) -> Result<Vec<ReservationDetails>> {
        authenticate(self.conn(), actor)?;
        Database::list_reservations_for_user(self.conn(), actor.user_id)
    }

    /// Every reservation, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] unless the caller is an admin.
    pub fn all_reservations(&self, actor: &Actor) -> Result<Vec<ReservationDetails>> {
        authenticate_admin(self.conn(), actor, "list all reservations")?;
        Database::list_all_reservations(self.conn())
    }

    /// Reservations on one day, by slot and table number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] unless the caller is an admin.
    pub fn reservations_for_date(
        &self,
        actor: &Actor,
        date: CalendarDay,
    ) -> Result<Vec<ReservationDetails>> {
        authenticate_admin(self.conn(), actor, "list reservations by date")?;
        Database::list_reservations_for_date(self.conn(), date)
    }

    /// One reservation, visible to its owner and to admins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id and
    /// [`Error::Forbidden`] for someone else's booking.
    pub fn get_reservation(&self, actor: &Actor, id: ReservationId) -> Result<ReservationDetails> {
        authenticate(self.conn(), actor)?;
        let details = Database::get_reservation_details(self.conn(), id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))?;
        if !actor.may_access(details.reservation.user_id) {
            return Err(Error::forbidden(format!(
                "reservation {id} belongs to another user"
            )));
        }
        Ok(details)
    }

    /// Every table, or only active ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] unless the caller is an admin.
    pub fn list_tables(&self, actor: &Actor, active_only: bool) -> Result<Vec<Table>> {
        authenticate_admin(self.conn(), actor, "list tables")?;
        Database::list_tables(self.conn(), active_only)
    }
}
