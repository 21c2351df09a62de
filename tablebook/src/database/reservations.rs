//! Reservation ledger queries.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::date::CalendarDay;
use crate::error::{Error, Result};
use crate::reservation::{
    NewReservation, Reservation, ReservationDetails, ReservationId, ReservationStatus,
};
use crate::slot::TimeSlot;
use crate::table::TableId;
use crate::user::UserId;

use super::connection::{is_unique_violation, Database};
use super::rows::{row_to_details, row_to_reservation, to_unix_secs};
use super::schema::DETAILS_SELECT;

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (user_id, table_id, date, time_slot, number_of_guests, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, 'confirmed', ?, ?)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET date = ?, time_slot = ?, number_of_guests = ?, status = ?, updated_at = ?
    WHERE id = ?
";

const SELECT_CONFIRMED: &str = r"
    SELECT id FROM reservations
    WHERE table_id = ? AND date = ? AND time_slot = ? AND status = 'confirmed'
";

const SELECT_RESERVED_TABLES: &str = r"
    SELECT DISTINCT table_id FROM reservations
    WHERE date = ? AND time_slot = ? AND status = 'confirmed'
";

const NEWEST_FIRST: &str = "ORDER BY r.date DESC, r.created_at DESC, r.id DESC";

fn slot_conflict(table_id: TableId, date: CalendarDay, slot: TimeSlot) -> Error {
    Error::Conflict {
        details: format!("table {table_id} is already reserved on {date} at {slot}"),
    }
}

impl Database {
    /// Persists a confirmed reservation and returns its id.
    ///
    /// Callers check for conflicts first; the partial unique index is
    /// the final guard and its violation is reported the same way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the table is already confirmed for
    /// that day and slot.
    pub fn insert_reservation(conn: &Connection, reservation: &NewReservation) -> Result<ReservationId> {
        let created = to_unix_secs(reservation.created_at());
        conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.user_id().value(),
                reservation.table_id().value(),
                reservation.date().key(),
                reservation.time_slot().ordinal(),
                reservation.number_of_guests(),
                created,
                created,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                slot_conflict(
                    reservation.table_id(),
                    reservation.date(),
                    reservation.time_slot(),
                )
            } else {
                e.into()
            }
        })?;

        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Looks up a reservation without joins.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("{DETAILS_SELECT} WHERE r.id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?)
    }

    /// Looks up a reservation with its table and user joined.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation_details(
        conn: &Connection,
        id: ReservationId,
    ) -> Result<Option<ReservationDetails>> {
        let sql = format!("{DETAILS_SELECT} WHERE r.id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], |row| row_to_details(row, true))
            .optional()?)
    }

    /// Finds the confirmed reservation holding a table for a day and slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_confirmed(
        conn: &Connection,
        table_id: TableId,
        date: CalendarDay,
        time_slot: TimeSlot,
    ) -> Result<Option<ReservationId>> {
        let id: Option<i64> = conn
            .query_row(
                SELECT_CONFIRMED,
                params![table_id.value(), date.key(), time_slot.ordinal()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(ReservationId::new))
    }

    /// Tables holding a confirmed reservation for a day and slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reserved_table_ids(
        conn: &Connection,
        date: CalendarDay,
        time_slot: TimeSlot,
    ) -> Result<HashSet<TableId>> {
        let mut stmt = conn.prepare(SELECT_RESERVED_TABLES)?;
        let ids = stmt
            .query_map(params![date.key(), time_slot.ordinal()], |row| {
                row.get::<_, i64>(0).map(TableId::new)
            })?
            .collect::<std::result::Result<HashSet<_>, rusqlite::Error>>()?;
        Ok(ids)
    }

    /// Sets the status of a reservation. Returns `false` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_reservation_status(
        conn: &Connection,
        id: ReservationId,
        status: ReservationStatus,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET status = ?, updated_at = ? WHERE id = ?",
            params![status.as_str(), to_unix_secs(now), id.value()],
        )?;
        Ok(rows > 0)
    }

    /// Writes every mutable column of `reservation` back to the store.
    ///
    /// No capacity or availability check happens here. Returns `false` if
    /// the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the write would leave two confirmed
    /// reservations on the same table, day and slot.
    pub fn store_reservation(conn: &Connection, reservation: &Reservation) -> Result<bool> {
        let rows = conn
            .execute(
                UPDATE_RESERVATION,
                params![
                    reservation.date.key(),
                    reservation.time_slot.ordinal(),
                    reservation.number_of_guests,
                    reservation.status.as_str(),
                    to_unix_secs(reservation.updated_at),
                    reservation.id.value(),
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    slot_conflict(reservation.table_id, reservation.date, reservation.time_slot)
                } else {
                    e.into()
                }
            })?;
        Ok(rows > 0)
    }

    /// A user's reservations, newest day first, then newest booking.
    ///
    /// The user join is left out; the caller already knows who they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_user(
        conn: &Connection,
        user_id: UserId,
    ) -> Result<Vec<ReservationDetails>> {
        let sql = format!("{DETAILS_SELECT} WHERE r.user_id = ? {NEWEST_FIRST}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([user_id.value()], |row| row_to_details(row, false))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
    }

    /// Every reservation, in the same order as a user's listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<ReservationDetails>> {
        let sql = format!("{DETAILS_SELECT} {NEWEST_FIRST}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| row_to_details(row, true))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
    }

    /// Reservations on one day, by slot then table number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_date(
        conn: &Connection,
        date: CalendarDay,
    ) -> Result<Vec<ReservationDetails>> {
        let sql = format!("{DETAILS_SELECT} WHERE r.date = ? ORDER BY r.time_slot, t.table_number");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([date.key()], |row| row_to_details(row, true))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
    }
}
