//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, caller identity
//! and timestamp formatting.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use tablebook::config::OutputFormat;
use tablebook::database::{resolve_data_dir, DATABASE_FILE};
use tablebook::{Actor, Config, ConfigBuilder, Database, DatabaseConfig, Error, Role, UserId};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Caller's user id.
    pub user: Option<UserId>,

    /// Caller's claimed role.
    pub role: Role,

    /// Output format from the command line, if given.
    pub format: Option<OutputFormat>,
}

impl GlobalOptions {
    /// The caller, or [`Error::Unauthenticated`] if no user id was given.
    pub fn actor(&self) -> Result<Actor, CliError> {
        let user = self.user.ok_or_else(|| Error::Unauthenticated {
            details: "no user given (pass --user or set TABLEBOOK_USER)".into(),
        })?;
        Ok(Actor::new(user, self.role))
    }

    /// The caller if one was given; adding the first user needs none.
    pub fn optional_actor(&self) -> Option<Actor> {
        self.user.map(|user| Actor::new(user, self.role))
    }

    /// Output format: command line, then configuration, then table.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or(config.output_format)
            .unwrap_or_default()
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project files found from the working directory upward
/// 3. The user config in the data directory
/// 4. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref dir) = global.data_dir {
        builder = builder.with_data_dir(dir);
    }
    builder.build().map_err(CliError::from)
}

/// Resolve the data directory: `--data-dir`, `TABLEBOOK_DATA_DIR`, then `~/.tablebook`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|_| {
            CliError::Config("Could not determine data directory (home directory not found)".into())
        }),
    }
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE);
    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);

    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Format a timestamp for display in local time.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
