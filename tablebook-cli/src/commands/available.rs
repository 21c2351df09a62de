//! Available command implementation.
//!
//! Lists the active tables that can seat a party and have no confirmed
//! reservation at the given day and slot. No caller identity is needed.

use crate::error::CliError;
use crate::output::print_list;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::availability::AvailabilityQuery;
use tablebook::service::ReservationService;
use tablebook::{CalendarDay, SystemClock, TimeSlot};

/// List tables free for a party at a day and slot.
#[derive(Args)]
pub struct AvailableCommand {
    /// Day to check (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: CalendarDay,

    /// Time slot, e.g. "7:00 PM"
    #[arg(long, value_name = "SLOT")]
    pub slot: TimeSlot,

    /// Party size
    #[arg(long, value_name = "N")]
    pub guests: u32,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let query = AvailabilityQuery::new(self.date, self.slot, self.guests);
        let service = ReservationService::new(&mut db, &SystemClock);
        let tables = service.find_available(&query)?;

        print_list(global.output_format(&config), tables)
    }
}
