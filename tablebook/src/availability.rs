//! Which tables are free for a party at a given day and time slot.
//!
//! A table is offered when it is active, seats at least the party, and
//! holds no confirmed reservation for the exact day and slot. This is a
//! read-only view; booking re-checks the slot itself.

use std::collections::HashSet;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{CalendarDay, Table, TableId, TimeSlot};

/// An availability request.
///
/// # Examples
///
/// ```
/// use tablebook::availability::AvailabilityQuery;
/// use tablebook::{CalendarDay, TimeSlot};
///
/// let query = AvailabilityQuery::new(
///     "2025-01-20".parse::<CalendarDay>().unwrap(),
///     "7:00pm".parse::<TimeSlot>().unwrap(),
///     4,
/// );
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Day to look at.
    pub date: CalendarDay,
    /// Slot to look at.
    pub time_slot: TimeSlot,
    /// Number of guests to seat.
    pub party_size: u32,
}

impl AvailabilityQuery {
    /// Creates a query.
    #[must_use]
    pub const fn new(date: CalendarDay, time_slot: TimeSlot, party_size: u32) -> Self {
        Self {
            date,
            time_slot,
            party_size,
        }
    }

    /// Checks the party size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty party.
    pub fn validate(&self) -> Result<()> {
        if self.party_size == 0 {
            return Err(Error::invalid(
                "number_of_guests",
                "party size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Lists free tables for the query, ordered by table number.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty party, or a database
/// error if a query fails.
///
/// # Examples
///
/// ```no_run
/// use tablebook::availability::{find_available, AvailabilityQuery};
/// use tablebook::{CalendarDay, Database, DatabaseConfig, TimeSlot};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
/// let query = AvailabilityQuery::new(
///     "2025-01-20".parse::<CalendarDay>().unwrap(),
///     TimeSlot::SevenPm,
///     2,
/// );
/// for table in find_available(db.connection(), &query).unwrap() {
///     println!("table {} is free", table.table_number);
/// }
/// ```
pub fn find_available(conn: &Connection, query: &AvailabilityQuery) -> Result<Vec<Table>> {
    query.validate()?;

    let candidates = Database::list_tables_seating(conn, query.party_size)?;
    let reserved = Database::reserved_table_ids(conn, query.date, query.time_slot)?;

    log::debug!(
        "availability {} {} party {}: {} candidates, {} reserved",
        query.date,
        query.time_slot,
        query.party_size,
        candidates.len(),
        reserved.len()
    );

    Ok(filter_available(candidates, &reserved, query.party_size))
}

/// Pure filtering step behind [`find_available`].
///
/// Keeps active tables that seat the party and are not in `reserved`,
/// sorted by table number.
#[must_use]
pub fn filter_available(
    tables: impl IntoIterator<Item = Table>,
    reserved: &HashSet<TableId>,
    party_size: u32,
) -> Vec<Table> {
    let mut free: Vec<Table> = tables
        .into_iter()
        .filter(|table| table.is_active && table.seats(party_size))
        .filter(|table| !reserved.contains(&table.id))
        .collect();
    free.sort_by_key(|table| table.table_number);
    free
}
