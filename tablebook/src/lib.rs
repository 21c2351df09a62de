#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! A library for restaurant table availability and reservations.
//!
//! Tables, users and reservations live in a shared `SQLite` database. At
//! most one confirmed reservation may hold a table for a given day and
//! time slot; that rule is enforced by the store itself, so concurrent
//! bookings from separate processes cannot double-book.
//!
//! ## Core Types
//!
//! - [`Table`], [`User`] and [`Reservation`]: the stored records
//! - [`TimeSlot`] and [`CalendarDay`]: when a reservation is for
//! - [`Actor`] and [`Clock`]: who is asking, and what day it is
//! - [`service::ReservationService`]: the request-level API
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use tablebook::{CalendarDay, TimeSlot};
//!
//! let slot: TimeSlot = "7:00pm".parse().unwrap();
//! assert_eq!(slot, TimeSlot::SevenPm);
//!
//! let day: CalendarDay = "2025-01-20".parse().unwrap();
//! assert_eq!(day.to_string(), "2025-01-20");
//! ```

pub mod availability;
pub mod clock;
pub mod config;
pub mod database;
pub mod date;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod response;
pub mod service;
pub mod slot;
pub mod table;
pub mod user;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use date::CalendarDay;
pub use error::{Error, Result, StatusClass};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use reservation::{
    NewReservation, Reservation, ReservationDetails, ReservationId, ReservationStatus,
    ReservationUpdate, ValidationError,
};
pub use slot::TimeSlot;
pub use table::{NewTable, Table, TableId, TableSummary, TableUpdate};
pub use user::{Actor, NewUser, Role, User, UserId, UserSummary};
