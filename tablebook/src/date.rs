//! Calendar-day keys for reservations.
//!
//! A reservation is made for a day, not an instant. Any date or timestamp
//! supplied by a caller is reduced to the local calendar day it falls on,
//! and that day is the key used for conflict checks and lookups.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day with the time of day stripped.
///
/// # Examples
///
/// ```
/// use tablebook::CalendarDay;
///
/// let day: CalendarDay = "2025-01-20".parse().unwrap();
/// let same: CalendarDay = "2025-01-20T19:30:00".parse().unwrap();
/// assert_eq!(day, same);
/// assert_eq!(day.to_string(), "2025-01-20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a day from year, month and day numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the numbers do not name a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "date".into(),
                message: format!("{year:04}-{month:02}-{day:02} is not a calendar date"),
            })
    }

    /// The local day an instant falls on.
    #[must_use]
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.with_timezone(&Local).date_naive())
    }

    /// Returns the underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns the storage key, `YYYY-MM-DD`.
    #[must_use]
    pub fn key(self) -> String {
        self.0.format(DAY_FORMAT).to_string()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for CalendarDay {
    type Err = ValidationError;

    /// Accepts a plain date, a naive date-time, or an RFC 3339 timestamp.
    /// Timestamps with an offset are converted to local time first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
            return Ok(Self(date));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(naive.date()));
            }
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::of(&instant));
        }

        Err(ValidationError {
            field: "date".into(),
            message: format!("'{s}' is not a date (expected YYYY-MM-DD)"),
        })
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
