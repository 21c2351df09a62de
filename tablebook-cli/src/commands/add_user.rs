//! Add-user command implementation.
//!
//! Admins add directory entries. While the directory is empty anyone may
//! add the first user, which is how an installation gets its first admin.

use crate::error::CliError;
use crate::output::print_outcome;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use tablebook::operations::AddUserOptions;
use tablebook::response::Response;
use tablebook::service::ReservationService;
use tablebook::{NewUser, Role, SystemClock};

/// Add a user to the directory.
#[derive(Args)]
pub struct AddUserCommand {
    /// Display name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Contact email; must be unused
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Give the new user the admin role
    #[arg(long)]
    pub admin: bool,

    /// Preview without adding the user
    #[arg(long)]
    pub dry_run: bool,
}

impl AddUserCommand {
    /// Execute the add-user command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let role = if self.admin { Role::Admin } else { Role::Customer };
        let user = NewUser::new(&self.name, &self.email, role)?;

        let config = load_configuration(global)?;
        let format = global.output_format(&config);
        let mut db = open_database(global, &config)?;

        let mut service = ReservationService::new(&mut db, &SystemClock);
        if self.dry_run {
            service = service.dry_run();
        }

        let options = AddUserOptions {
            actor: global.optional_actor(),
            user,
        };
        let outcome = service.add_user(options)?;
        print_outcome(format, global.quiet, outcome, |user| {
            Response::created(user).with_message("User created successfully")
        })
    }
}
