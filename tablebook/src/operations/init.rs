//! Data directory and database initialization.
//!
//! This module creates the tablebook data directory and database, and can
//! optionally write a commented default configuration and seed the floor
//! plan. Re-running with `--seed` against an existing database only adds the
//! seed tables that are missing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::database::DATABASE_FILE;
use crate::error::{Error, Result};
use crate::{Database, DatabaseConfig, NewTable};

use super::executor::PlanExecutor;
use super::tables::plan_seed_tables;

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default `config.yaml` if none exists.
    pub create_config: bool,
    /// Tables to create after the schema; `None` seeds nothing.
    pub seed_tables: Option<Vec<NewTable>>,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl InitOptions {
    /// Creates new initialization options.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            seed_tables: None,
            dry_run: false,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to create the default configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Seeds these tables after creating the schema.
    #[must_use]
    pub fn with_seed_tables(mut self, tables: Vec<NewTable>) -> Self {
        self.seed_tables = Some(tables);
        self
    }

    /// Sets dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was created.
    pub config_created: bool,
    /// Number of seed tables added.
    pub tables_seeded: usize,
    /// Path to the data directory.
    pub data_dir: PathBuf,
    /// Whether nothing was actually written.
    pub dry_run: bool,
}

/// Default commented configuration template.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r"# tablebook configuration
#
# Values here are overridden by tablebook.yaml / tablebook.local.yaml found
# from the working directory upward, then by TABLEBOOK_* environment variables.

# Maximum time to wait for the database lock, in seconds (default: 5)
# maximum_lock_wait_seconds: 5

# Output format for list commands: table, json, csv or tsv (default: table)
# output_format: table

# Refuse to create the database implicitly; require `tablebook init`
# disable_autoinit: false

# Floor plan created by `tablebook init --seed`
# seed_tables:
#   - { number: 1, capacity: 2 }
#   - { number: 2, capacity: 2 }
#   - { number: 3, capacity: 4 }
#   - { number: 4, capacity: 4 }
";

/// Initializes the tablebook data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database cannot be opened or initialized
/// - The configuration file cannot be written
/// - The database exists and neither overwrite nor seeding was requested
///
/// # Examples
///
/// ```no_run
/// use tablebook::operations::init::{init_database, InitOptions};
/// use tablebook::config::Config;
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/tablebook-demo"))
///     .with_create_config(true)
///     .with_seed_tables(Config::default().seed_floor_plan());
///
/// let result = init_database(&options).unwrap();
/// println!("Seeded {} tables", result.tables_seeded);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        tables_seeded: 0,
        data_dir: options.data_dir.clone(),
        dry_run: options.dry_run,
    };

    let db_path = options.data_dir.join(DATABASE_FILE);
    let db_exists = db_path.exists();

    if db_exists && !options.overwrite && options.seed_tables.is_none() {
        return Err(Error::invalid(
            "database",
            format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                db_path.display()
            ),
        ));
    }

    if options.dry_run {
        result.data_dir_created = !options.data_dir.exists();
        result.database_created = !db_exists || options.overwrite;
        result.config_created =
            options.create_config && !options.data_dir.join("config.yaml").exists();
        result.tables_seeded = options.seed_tables.as_ref().map_or(0, Vec::len);
        return Ok(result);
    }

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    if db_exists && options.overwrite {
        remove_database_files(&db_path)?;
    }

    let mut db = Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = !db_exists || options.overwrite;
    log::info!("database ready at {}", db_path.display());

    if let Some(seeds) = &options.seed_tables {
        let tx = db.begin_transaction()?;
        let plan = plan_seed_tables(&tx, seeds)?;
        for warning in &plan.warnings {
            log::warn!("{warning}");
        }
        let executed = PlanExecutor::new(&tx).execute(&plan)?;
        tx.commit()?;
        result.tables_seeded = executed.table_ids.len();
    }

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}

fn remove_database_files(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = PathBuf::from(sidecar);
        if sidecar.exists() {
            fs::remove_file(sidecar)?;
        }
    }
    Ok(())
}
