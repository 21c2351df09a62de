//! Book command implementation.
//!
//! This module implements the `book` command, which reserves a table for
//! the caller. The capacity, past-day and slot checks run inside one
//! transaction, so two concurrent bookings cannot both win.

use crate::error::CliError;
use crate::output::print_outcome;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::operations::BookOptions;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{CalendarDay, SystemClock, TableId, TimeSlot};

/// Book a table.
#[derive(Args)]
pub struct BookCommand {
    /// Table id (see `tablebook available`)
    #[arg(long, value_name = "ID")]
    pub table: TableId,

    /// Day of the reservation (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: CalendarDay,

    /// Time slot, e.g. "7:00 PM"
    #[arg(long, value_name = "SLOT")]
    pub slot: TimeSlot,

    /// Party size
    #[arg(long, value_name = "N")]
    pub guests: u32,

    /// Check the booking without making it
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = global.output_format(&config);
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;

        let mut service = ReservationService::new(&mut db, &SystemClock);
        if self.dry_run {
            service = service.dry_run();
        }

        let options = BookOptions::new(actor, self.table, self.date, self.slot, self.guests);
        let outcome = service.book(options)?;

        print_outcome(format, global.quiet, outcome, |details| {
            Response::created(details).with_message("Reservation created successfully")
        })
    }
}
