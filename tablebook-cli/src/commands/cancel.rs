//! Cancel command implementation.
//!
//! The owner or an admin may cancel a reservation. Cancelling frees the
//! slot for new bookings; the record itself is kept.

use crate::error::CliError;
use crate::output::print_outcome;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::operations::CancelOptions;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{ReservationId, SystemClock};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Preview the cancellation without making it
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = global.output_format(&config);
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;

        let mut service = ReservationService::new(&mut db, &SystemClock);
        if self.dry_run {
            service = service.dry_run();
        }

        let outcome = service.cancel(CancelOptions::new(actor, self.id))?;
        print_outcome(format, global.quiet, outcome, |details| {
            Response::ok(details).with_message("Reservation cancelled successfully")
        })
    }
}
