//! Booking operation planning.
//!
//! A booking is checked in a fixed order: caller, input, date, table,
//! active flag, capacity, then the slot itself. The first failing check
//! decides the error. The slot check here is advisory for dry runs; the
//! unique index on confirmed reservations is what actually stops a
//! double booking that races past it.

use rusqlite::Connection;

use crate::clock::Clock;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Actor, CalendarDay, NewReservation, TableId, TimeSlot};

use super::access::authenticate;
use super::plan::{OperationPlan, PlanAction};

/// Options for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookOptions {
    /// Who is booking; the reservation is made in their name.
    pub actor: Actor,
    /// Table to book.
    pub table_id: TableId,
    /// Day of the visit.
    pub date: CalendarDay,
    /// Time slot of the visit.
    pub time_slot: TimeSlot,
    /// Party size.
    pub number_of_guests: u32,
}

impl BookOptions {
    /// Creates booking options.
    #[must_use]
    pub const fn new(
        actor: Actor,
        table_id: TableId,
        date: CalendarDay,
        time_slot: TimeSlot,
        number_of_guests: u32,
    ) -> Self {
        Self {
            actor,
            table_id,
            date,
            time_slot,
            number_of_guests,
        }
    }
}

/// A booking plan generator.
pub struct BookPlan<'c> {
    options: BookOptions,
    clock: &'c dyn Clock,
}

impl<'c> BookPlan<'c> {
    /// Creates a booking planner that reads "today" from `clock`.
    #[must_use]
    pub const fn new(options: BookOptions, clock: &'c dyn Clock) -> Self {
        Self { options, clock }
    }

    /// Builds an operation plan for this booking.
    ///
    /// This method performs validation and does NOT modify the database.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthenticated`] if the caller is not in the directory
    /// - [`Error::InvalidInput`] for an empty party
    /// - [`Error::PastDate`] if the day is before today
    /// - [`Error::NotFound`] if the table does not exist
    /// - [`Error::TableInactive`] if the table is deactivated
    /// - [`Error::CapacityExceeded`] if the party does not fit
    /// - [`Error::Conflict`] if the slot is already taken
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tablebook::operations::{BookOptions, BookPlan};
    /// use tablebook::{Actor, Database, DatabaseConfig, Role, SystemClock, TableId, TimeSlot, UserId};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
    /// let options = BookOptions::new(
    ///     Actor::new(UserId::new(1), Role::Customer),
    ///     TableId::new(1),
    ///     "2099-01-20".parse().unwrap(),
    ///     TimeSlot::SevenPm,
    ///     2,
    /// );
    /// let plan = BookPlan::new(options, &SystemClock).build_plan(db.connection()).unwrap();
    /// assert_eq!(plan.len(), 1);
    /// ```
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let o = &self.options;
        let plan = OperationPlan::new(format!(
            "Book table {} on {} at {} for {} guests",
            o.table_id, o.date, o.time_slot, o.number_of_guests
        ));

        authenticate(conn, &o.actor)?;

        let reservation = NewReservation::builder(o.actor.user_id, o.table_id, o.date, o.time_slot)
            .number_of_guests(o.number_of_guests)
            .build()?;

        let today = self.clock.today();
        if o.date < today {
            return Err(Error::PastDate {
                date: o.date,
                today,
            });
        }

        let table = Database::get_table(conn, o.table_id)?
            .ok_or_else(|| Error::not_found(format!("table {}", o.table_id)))?;

        if !table.is_active {
            return Err(Error::TableInactive {
                table_number: table.table_number,
            });
        }

        if !table.seats(o.number_of_guests) {
            return Err(Error::CapacityExceeded {
                table_number: table.table_number,
                capacity: table.capacity,
                requested: o.number_of_guests,
            });
        }

        if let Some(existing) = Database::find_confirmed(conn, o.table_id, o.date, o.time_slot)? {
            log::debug!("table {} already held by reservation {existing}", o.table_id);
            return Err(Error::Conflict {
                details: format!(
                    "table {} is already reserved on {} at {}",
                    table.table_number, o.date, o.time_slot
                ),
            });
        }

        Ok(plan.add_action(PlanAction::CreateReservation(reservation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, MockClock};
    use crate::database::test_util::{add_table, add_user, create_test_database, day};
    use crate::operations::PlanExecutor;
    use crate::{Role, TableUpdate, UserId};

    const TODAY: (i32, u32, u32) = (2025, 1, 15);

    fn clock() -> FixedClock {
        FixedClock::new(day(TODAY.0, TODAY.1, TODAY.2))
    }

    fn plan_for(
        conn: &Connection,
        actor: Actor,
        table_id: TableId,
        date: CalendarDay,
        guests: u32,
    ) -> Result<OperationPlan> {
        let options = BookOptions::new(actor, table_id, date, TimeSlot::SevenPm, guests);
        BookPlan::new(options, &clock()).build_plan(conn)
    }

    #[test]
    fn test_valid_booking_plans_one_reservation() {
        let db = create_test_database();
        let conn = db.connection();
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let table = add_table(conn, 1, 4);
        let actor = Actor::new(user.id, Role::Customer);

        let plan = plan_for(conn, actor, table.id, day(2025, 1, 20), 4).unwrap();
        assert_eq!(plan.len(), 1);
        assert!(matches!(plan.actions[0], PlanAction::CreateReservation(_)));
    }

    #[test]
    fn test_today_is_bookable_yesterday_is_not() {
        let db = create_test_database();
        let conn = db.connection();
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let table = add_table(conn, 1, 4);
        let actor = Actor::new(user.id, Role::Customer);

        assert!(plan_for(conn, actor, table.id, day(2025, 1, 15), 2).is_ok());
        let err = plan_for(conn, actor, table.id, day(2025, 1, 14), 2).unwrap_err();
        assert!(matches!(err, Error::PastDate { .. }));
    }

    #[test]
    fn test_checks_run_in_order() {
        let db = create_test_database();
        let conn = db.connection();
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let actor = Actor::new(user.id, Role::Customer);
        let small = add_table(conn, 1, 2);
        let closed = add_table(conn, 2, 8);
        Database::store_table(conn, &TableUpdate::default().with_active(false).apply(&closed))
            .unwrap();

        let stranger = Actor::new(UserId::new(99), Role::Customer);
        assert!(matches!(
            plan_for(conn, stranger, small.id, day(2025, 1, 20), 0).unwrap_err(),
            Error::Unauthenticated { .. }
        ));
        assert!(matches!(
            plan_for(conn, actor, small.id, day(2025, 1, 1), 0).unwrap_err(),
            Error::InvalidInput { .. }
        ));
        assert!(matches!(
            plan_for(conn, actor, TableId::new(999), day(2025, 1, 1), 2).unwrap_err(),
            Error::PastDate { .. }
        ));
        assert!(matches!(
            plan_for(conn, actor, TableId::new(999), day(2025, 1, 20), 2).unwrap_err(),
            Error::NotFound { .. }
        ));
        assert!(matches!(
            plan_for(conn, actor, closed.id, day(2025, 1, 20), 2).unwrap_err(),
            Error::TableInactive { table_number: 2 }
        ));
        let err = plan_for(conn, actor, small.id, day(2025, 1, 20), 3).unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                capacity: 2,
                requested: 3,
                ..
            }
        ));
        assert!(err.to_string().contains("only accommodate 2 guests"));
    }

    #[test]
    fn test_taken_slot_conflicts() {
        let db = create_test_database();
        let conn = db.connection();
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let table = add_table(conn, 1, 4);
        let actor = Actor::new(user.id, Role::Customer);

        let plan = plan_for(conn, actor, table.id, day(2025, 1, 20), 4).unwrap();
        PlanExecutor::new(conn).execute(&plan).unwrap();

        let err = plan_for(conn, actor, table.id, day(2025, 1, 20), 4).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[test]
    fn test_today_comes_from_injected_clock() {
        let db = create_test_database();
        let conn = db.connection();
        let user = add_user(conn, "Ada", "ada@example.com", Role::Customer);
        let table = add_table(conn, 1, 4);

        let mut mock = MockClock::new();
        mock.expect_today()
            .times(1)
            .return_const(day(2030, 6, 1));

        let options = BookOptions::new(
            Actor::new(user.id, Role::Customer),
            table.id,
            day(2030, 5, 31),
            TimeSlot::OnePm,
            2,
        );
        let err = BookPlan::new(options, &mock).build_plan(conn).unwrap_err();
        assert!(matches!(err, Error::PastDate { .. }));
    }
}
