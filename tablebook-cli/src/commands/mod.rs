//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory and database, optionally seeded
//! - `available`: List tables free for a party at a day and slot
//! - `book`: Book a table
//! - `reservations`: List the caller's reservations, or all of them as admin
//! - `show_reservation`: Show one reservation
//! - `cancel`: Cancel a reservation
//! - `edit_reservation`: Change a reservation (admin)
//! - `tables`: List tables (admin)
//! - `add_table`: Register a table (admin)
//! - `update_table`: Change a table's capacity or active flag (admin)
//! - `add_user`: Add a user to the directory
//! - `validate`: Validate configuration file
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod add_table;
pub mod add_user;
pub mod available;
pub mod book;
pub mod cancel;
pub mod completions;
pub mod edit_reservation;
pub mod init;
pub mod reservations;
pub mod show_data_dir;
pub mod show_reservation;
pub mod tables;
pub mod update_table;
pub mod validate;

pub use add_table::AddTableCommand;
pub use add_user::AddUserCommand;
pub use available::AvailableCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use edit_reservation::EditReservationCommand;
pub use init::InitCommand;
pub use reservations::ReservationsCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use show_reservation::ShowReservationCommand;
pub use tables::TablesCommand;
pub use update_table::UpdateTableCommand;
pub use validate::ValidateCommand;
