//! Command to show one reservation to its owner or an admin.

use crate::error::CliError;
use crate::output::print_record;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{ReservationId, SystemClock};

/// Show one reservation.
#[derive(Args)]
pub struct ShowReservationCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,
}

impl ShowReservationCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;
        let service = ReservationService::new(&mut db, &SystemClock);

        let details = service.get_reservation(&actor, self.id)?;
        print_record(
            global.output_format(&config),
            Response::ok(details),
            global.quiet,
        )
    }
}
