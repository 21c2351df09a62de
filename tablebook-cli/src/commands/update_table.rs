//! Update-table command implementation.
//!
//! Deactivating a table hides it from availability and refuses new
//! bookings; existing reservations on it are left alone.

use crate::error::CliError;
use crate::output::print_outcome;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::operations::UpdateTableOptions;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{SystemClock, TableId, TableUpdate};

/// Change a table's capacity or active flag (admin).
#[derive(Args)]
pub struct UpdateTableCommand {
    /// Table id
    #[arg(value_name = "ID")]
    pub id: TableId,

    /// New seat count
    #[arg(long, value_name = "SEATS")]
    pub capacity: Option<u32>,

    /// Allow bookings on the table
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,

    /// Stop bookings on the table
    #[arg(long)]
    pub inactive: bool,

    /// Preview without changing the table
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateTableCommand {
    fn update(&self) -> TableUpdate {
        let mut update = TableUpdate::default();
        if let Some(capacity) = self.capacity {
            update = update.with_capacity(capacity);
        }
        if self.active {
            update = update.with_active(true);
        } else if self.inactive {
            update = update.with_active(false);
        }
        update
    }

    /// Execute the update-table command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let update = self.update();
        if update.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to change (pass --capacity, --active or --inactive)".into(),
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

        let options = UpdateTableOptions {
            actor,
            table_id: self.id,
            update,
        };
        let outcome = service.update_table(options)?;
        print_outcome(format, global.quiet, outcome, |table| {
            Response::ok(table).with_message("Table updated successfully")
        })
    }
}
