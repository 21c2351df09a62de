//! Row decoding and timestamp conversion shared by the store modules.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

use crate::reservation::{Reservation, ReservationDetails, ReservationId, ReservationStatus};
use crate::slot::TimeSlot;
use crate::table::{Table, TableId, TableSummary};
use crate::user::{Role, User, UserId, UserSummary};
use crate::CalendarDay;

/// Converts a timestamp to Unix epoch seconds for storage.
pub(super) const fn to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts stored Unix epoch seconds back into a timestamp.
pub(super) fn from_unix_secs(idx: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

fn parse_column<T>(idx: usize, text: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Expects the columns of [`super::schema::TABLE_COLUMNS`].
pub(super) fn row_to_table(row: &Row<'_>) -> rusqlite::Result<Table> {
    Ok(Table {
        id: TableId::new(row.get(0)?),
        table_number: row.get(1)?,
        capacity: row.get(2)?,
        is_active: row.get(3)?,
        created_at: from_unix_secs(4, row.get(4)?)?,
        updated_at: from_unix_secs(5, row.get(5)?)?,
    })
}

/// Expects the columns of [`super::schema::USER_COLUMNS`].
pub(super) fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(3)?;
    Ok(User {
        id: UserId::new(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_column::<Role>(3, &role)?,
        created_at: from_unix_secs(4, row.get(4)?)?,
    })
}

/// Expects the first nine columns of [`super::schema::DETAILS_SELECT`].
pub(super) fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let date: String = row.get(3)?;
    let ordinal: u8 = row.get(4)?;
    let status: String = row.get(6)?;

    let time_slot = TimeSlot::from_ordinal(ordinal)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(4, i64::from(ordinal)))?;

    Ok(Reservation {
        id: ReservationId::new(row.get(0)?),
        user_id: UserId::new(row.get(1)?),
        table_id: TableId::new(row.get(2)?),
        date: parse_column::<CalendarDay>(3, &date)?,
        time_slot,
        number_of_guests: row.get(5)?,
        status: parse_column::<ReservationStatus>(6, &status)?,
        created_at: from_unix_secs(7, row.get(7)?)?,
        updated_at: from_unix_secs(8, row.get(8)?)?,
    })
}

/// Expects all columns of [`super::schema::DETAILS_SELECT`].
///
/// The user join is dropped when `with_user` is false, which is how a
/// customer's own listing is shaped.
pub(super) fn row_to_details(row: &Row<'_>, with_user: bool) -> rusqlite::Result<ReservationDetails> {
    let reservation = row_to_reservation(row)?;
    let table = TableSummary {
        table_number: row.get(9)?,
        capacity: row.get(10)?,
    };

    let user = if with_user {
        let name: Option<String> = row.get(11)?;
        let email: Option<String> = row.get(12)?;
        name.zip(email).map(|(name, email)| UserSummary {
            id: reservation.user_id,
            name,
            email,
        })
    } else {
        None
    };

    Ok(ReservationDetails {
        reservation,
        table,
        user,
    })
}
