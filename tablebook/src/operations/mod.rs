//! Booking and administration operations using the plan-execute pattern.
//!
//! Planning and execution are separate so that every request can be
//! previewed with `--dry-run`, tested without side effects, and rejected
//! with a precise error before anything is written.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: checks the caller and the request against the current
//!    state and builds an [`OperationPlan`]
//! 2. **Execution**: [`PlanExecutor`] applies the plan's actions in order
//!
//! Mutating callers run both phases inside one IMMEDIATE transaction (see
//! [`crate::service::ReservationService`]), so the state a plan was built
//! from cannot change before it is applied.
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::operations::{BookOptions, BookPlan, PlanExecutor};
//! use tablebook::{Actor, Database, DatabaseConfig, Role, SystemClock, TableId, TimeSlot, UserId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
//! let options = BookOptions::new(
//!     Actor::new(UserId::new(1), Role::Customer),
//!     TableId::new(3),
//!     "2099-05-01".parse().unwrap(),
//!     TimeSlot::SevenPm,
//!     4,
//! );
//!
//! let tx = db.begin_transaction().unwrap();
//! let plan = BookPlan::new(options, &SystemClock).build_plan(&tx).unwrap();
//! let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
//! tx.commit().unwrap();
//! println!("booked {:?}", result.reservation_id);
//! ```

pub mod access;
pub mod book;
pub mod cancel;
pub mod edit;
pub mod executor;
pub mod init;
pub mod plan;
pub mod tables;
pub mod users;

#[cfg(test)]
mod proptests;

pub use access::{authenticate, authenticate_admin};
pub use book::{BookOptions, BookPlan};
pub use cancel::{CancelOptions, CancelPlan};
pub use edit::{EditReservationOptions, EditReservationPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use tables::{
    plan_seed_tables, CreateTableOptions, CreateTablePlan, UpdateTableOptions, UpdateTablePlan,
};
pub use users::{AddUserOptions, AddUserPlan};
