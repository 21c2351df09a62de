//! Add-table command implementation.

use crate::error::CliError;
use crate::output::print_outcome;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::operations::CreateTableOptions;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{NewTable, SystemClock};

/// Register a table (admin).
#[derive(Args)]
pub struct AddTableCommand {
    /// Table number shown to guests; must be unused
    #[arg(long, value_name = "N")]
    pub number: u32,

    /// Seats at the table
    #[arg(long, value_name = "SEATS")]
    pub capacity: u32,

    /// Preview without registering the table
    #[arg(long)]
    pub dry_run: bool,
}

impl AddTableCommand {
    /// Execute the add-table command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let table = NewTable::new(self.number, self.capacity)?;

        let config = load_configuration(global)?;
        let format = global.output_format(&config);
        let actor = global.actor()?;
        let mut db = open_database(global, &config)?;

        let mut service = ReservationService::new(&mut db, &SystemClock);
        if self.dry_run {
            service = service.dry_run();
        }

        let outcome = service.create_table(CreateTableOptions { actor, table })?;
        print_outcome(format, global.quiet, outcome, |table| {
            Response::created(table).with_message("Table created successfully")
        })
    }
}
