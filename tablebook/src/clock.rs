//! Source of "today" for past-date checks.
//!
//! Booking rejects days before today. Which day is today is asked of a
//! [`Clock`] passed in by the caller, so tests can pin it.

use chrono::Local;

use crate::date::CalendarDay;

/// Supplies the current local calendar day.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Returns today's calendar day.
    fn today(&self) -> CalendarDay;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDay {
        CalendarDay::new(Local::now().date_naive())
    }
}

/// Always reports the same day.
///
/// # Examples
///
/// ```
/// use tablebook::{CalendarDay, Clock, FixedClock};
///
/// let day = CalendarDay::from_ymd(2025, 1, 15).unwrap();
/// assert_eq!(FixedClock::new(day).today(), day);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: CalendarDay,
}

impl FixedClock {
    /// Creates a clock pinned to `today`.
    #[must_use]
    pub const fn new(today: CalendarDay) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDay {
        self.today
    }
}
