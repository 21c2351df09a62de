//! Reservations command implementation.
//!
//! Customers see their own reservations, newest first. Admins may list
//! every reservation or one day's reservations ordered by slot and table.

use crate::error::CliError;
use crate::output::print_list;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::service::ReservationService;
use tablebook::{CalendarDay, SystemClock};

/// List reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// List every reservation (admin)
    #[arg(long, conflicts_with = "date")]
    pub all: bool,

    /// List reservations on one day (admin)
    #[arg(long, value_name = "DATE")]
    pub date: Option<CalendarDay>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;
        let service = ReservationService::new(&mut db, &SystemClock);

        let reservations = match self.date {
            Some(date) => service.reservations_for_date(&actor, date)?,
            None if self.all => service.all_reservations(&actor)?,
            None => service.my_reservations(&actor)?,
        };

        print_list(global.output_format(&config), reservations)
    }
}
