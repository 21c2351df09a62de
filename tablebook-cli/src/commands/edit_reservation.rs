//! Edit-reservation command implementation.
//!
//! Admins may move a reservation to another day or slot, change its party
//! size or set its status. Moving onto a slot another confirmed booking
//! holds is still refused.

use crate::error::CliError;
use crate::output::print_outcome;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::operations::EditReservationOptions;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{
    CalendarDay, ReservationId, ReservationStatus, ReservationUpdate, SystemClock, TimeSlot,
};

/// Change a reservation (admin).
#[derive(Args)]
pub struct EditReservationCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// New day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<CalendarDay>,

    /// New time slot
    #[arg(long, value_name = "SLOT")]
    pub slot: Option<TimeSlot>,

    /// New party size
    #[arg(long, value_name = "N")]
    pub guests: Option<u32>,

    /// New status (confirmed or cancelled)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// Preview the edit without making it
    #[arg(long)]
    pub dry_run: bool,
}

impl EditReservationCommand {
    /// Execute the edit-reservation command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let update = ReservationUpdate {
            date: self.date,
            time_slot: self.slot,
            number_of_guests: self.guests,
            status: self.status,
        };
        if update.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to change (pass --date, --slot, --guests or --status)".into(),
            ));
        }

        let config = load_configuration(global)?;
        let format = global.output_format(&config);
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;

        let mut service = ReservationService::new(&mut db, &SystemClock);
        if self.dry_run {
            service = service.dry_run();
        }

        let options = EditReservationOptions::new(actor, self.id).with_update(update);
        let outcome = service.edit_reservation(options)?;
        print_outcome(format, global.quiet, outcome, |details| {
            Response::ok(details).with_message("Reservation updated successfully")
        })
    }
}
