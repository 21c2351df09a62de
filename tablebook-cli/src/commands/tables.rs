//! Tables command implementation.

use crate::error::CliError;
use crate::output::print_list;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::service::ReservationService;
use tablebook::SystemClock;

/// List tables (admin).
#[derive(Args)]
pub struct TablesCommand {
    /// Only list tables that can be booked
    #[arg(long)]
    pub active_only: bool,
}

impl TablesCommand {
    /// Execute the tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;
        let service = ReservationService::new(&mut db, &SystemClock);

        let tables = service.list_tables(&actor, self.active_only)?;
        print_list(global.output_format(&config), tables)
    }
}
