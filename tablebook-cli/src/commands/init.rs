//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the tablebook data directory and database, optionally seeding the
//! floor plan.

use crate::error::CliError;
use crate::utils::{data_dir, load_configuration, GlobalOptions};
use clap::Args;
use tablebook::database::DATABASE_FILE;
use tablebook::operations::{init_database, InitOptions};

/// Initialize the tablebook data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Register the configured seed tables (eight tables by default)
    #[arg(long)]
    seed: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` has no effect here; creating the database is the point.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = data_dir(global)?;

        let mut options = InitOptions::new(data_dir.clone())
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_dry_run(self.dry_run);

        if self.seed {
            let config = load_configuration(global)?;
            options = options.with_seed_tables(config.seed_floor_plan());
        }

        let result = init_database(&options).map_err(CliError::from)?;

        if result.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize tablebook in: {}", data_dir.display());
            if result.data_dir_created {
                println!("  - Create data directory: {}", data_dir.display());
            }
            let db_path = data_dir.join(DATABASE_FILE);
            if result.database_created {
                if self.overwrite && db_path.exists() {
                    println!("  - Remove existing database: {}", db_path.display());
                }
                println!("  - Create database: {}", db_path.display());
            }
            if result.tables_seeded > 0 {
                println!("  - Register up to {} seed tables", result.tables_seeded);
            }
            if result.config_created {
                println!(
                    "  - Create configuration file: {}",
                    data_dir.join("config.yaml").display()
                );
            }
            return Ok(());
        }

        println!("Initialized tablebook in: {}", result.data_dir.display());

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }

        if self.seed {
            println!("  - Registered {} seed tables", result.tables_seeded);
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
