//! Command to show the resolved data directory path.

use crate::error::CliError;
use crate::utils::{data_dir, GlobalOptions};
use clap::Args;

/// Show the resolved data directory path.
#[derive(Args)]
pub struct ShowDataDirCommand {}

impl ShowDataDirCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        println!("{}", data_dir(global)?.display());
        Ok(())
    }
}
