//! Reservation types.
//!
//! A reservation ties one user to one table for one time slot on one
//! calendar day. It is created `confirmed` and can only move to
//! `cancelled` through the booking path.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::CalendarDay;
use crate::slot::TimeSlot;
use crate::table::{TableId, TableSummary};
use crate::user::{UserId, UserSummary};

#[cfg(test)]
mod proptests;

/// Opaque identifier of a stored reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
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

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "reservation_id".into(),
                message: format!("'{s}' is not a reservation id"),
            })
    }
}

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Holds the table.
    Confirmed,
    /// Released; terminal on the booking path.
    Cancelled,
}

impl ReservationStatus {
    /// Stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("'{s}' is not a status (expected confirmed or cancelled)"),
            }),
        }
    }
}

/// A reservation that has not been stored yet.
///
/// # Examples
///
/// ```
/// use tablebook::{CalendarDay, NewReservation, TableId, TimeSlot, UserId};
///
/// let day = CalendarDay::from_ymd(2025, 1, 20).unwrap();
/// let request = NewReservation::builder(UserId::new(1), TableId::new(1), day, TimeSlot::SevenPm)
///     .number_of_guests(4)
///     .build()
///     .unwrap();
/// assert_eq!(request.number_of_guests(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    user_id: UserId,
    table_id: TableId,
    date: CalendarDay,
    time_slot: TimeSlot,
    number_of_guests: u32,
    created_at: DateTime<Utc>,
}

impl NewReservation {
    /// Starts building a reservation request.
    #[must_use]
    pub fn builder(
        user_id: UserId,
        table_id: TableId,
        date: CalendarDay,
        time_slot: TimeSlot,
    ) -> NewReservationBuilder {
        NewReservationBuilder {
            user_id,
            table_id,
            date,
            time_slot,
            number_of_guests: None,
            created_at: None,
        }
    }

    /// Who is booking.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Which table.
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Which day.
    #[must_use]
    pub const fn date(&self) -> CalendarDay {
        self.date
    }

    /// Which slot.
    #[must_use]
    pub const fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    /// Party size.
    #[must_use]
    pub const fn number_of_guests(&self) -> u32 {
        self.number_of_guests
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for [`NewReservation`].
#[derive(Debug)]
pub struct NewReservationBuilder {
    user_id: UserId,
    table_id: TableId,
    date: CalendarDay,
    time_slot: TimeSlot,
    number_of_guests: Option<u32>,
    created_at: Option<DateTime<Utc>>,
}

impl NewReservationBuilder {
    /// Sets the party size.
    #[must_use]
    pub const fn number_of_guests(mut self, guests: u32) -> Self {
        self.number_of_guests = Some(guests);
        self
    }

    /// Sets the creation timestamp (defaults to now).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the party size is missing or zero.
    pub fn build(self) -> Result<NewReservation, ValidationError> {
        let number_of_guests = self.number_of_guests.ok_or_else(|| ValidationError {
            field: "number_of_guests".into(),
            message: "number of guests is required".into(),
        })?;
        validate_guests(number_of_guests)?;

        Ok(NewReservation {
            user_id: self.user_id,
            table_id: self.table_id,
            date: self.date,
            time_slot: self.time_slot,
            number_of_guests,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Identifier.
    pub id: ReservationId,
    /// Owner.
    pub user_id: UserId,
    /// Booked table.
    pub table_id: TableId,
    /// Booked day.
    pub date: CalendarDay,
    /// Booked slot.
    pub time_slot: TimeSlot,
    /// Party size.
    pub number_of_guests: u32,
    /// Current state.
    pub status: ReservationStatus,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// True while the reservation holds its table.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self.status, ReservationStatus::Confirmed)
    }
}

/// A reservation joined with its table and, for staff views, its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    /// The reservation itself.
    #[serde(flatten)]
    pub reservation: Reservation,
    /// The booked table.
    pub table: TableSummary,
    /// The owner, when the view includes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// An admin edit of a reservation. Fields left as `None` are untouched.
///
/// Edits skip the capacity and availability checks that booking runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    /// New day.
    pub date: Option<CalendarDay>,
    /// New slot.
    pub time_slot: Option<TimeSlot>,
    /// New party size.
    pub number_of_guests: Option<u32>,
    /// New status.
    pub status: Option<ReservationStatus>,
}

impl ReservationUpdate {
    /// True when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time_slot.is_none()
            && self.number_of_guests.is_none()
            && self.status.is_none()
    }

    /// Checks the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied party size is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(guests) = self.number_of_guests {
            validate_guests(guests)?;
        }
        Ok(())
    }

    /// Applies the edit to a copy of `reservation`.
    #[must_use]
    pub fn apply(&self, reservation: &Reservation) -> Reservation {
        let mut updated = reservation.clone();
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(slot) = self.time_slot {
            updated.time_slot = slot;
        }
        if let Some(guests) = self.number_of_guests {
            updated.number_of_guests = guests;
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        updated
    }
}

fn validate_guests(guests: u32) -> Result<(), ValidationError> {
    if guests == 0 {
        return Err(ValidationError {
            field: "number_of_guests".into(),
            message: "number of guests must be at least 1".into(),
        });
    }
    Ok(())
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
