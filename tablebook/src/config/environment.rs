//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `TABLEBOOK_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::{Config, OutputFormat, SeedTable};
use crate::error::{Error, Result};

/// Disables automatic database creation.
pub const DISABLE_AUTOINIT_ENV: &str = "TABLEBOOK_DISABLE_AUTOINIT";
/// Overrides the lock wait in seconds.
pub const LOCK_WAIT_ENV: &str = "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides the output format.
pub const OUTPUT_FORMAT_ENV: &str = "TABLEBOOK_OUTPUT_FORMAT";
/// Replaces the seed floor plan, as `number:capacity` pairs.
pub const SEED_TABLES_ENV: &str = "TABLEBOOK_SEED_TABLES";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads the `TABLEBOOK_*` variables and applies them with higher
    /// precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the variable if a value is
    /// malformed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(
                seconds
                    .trim()
                    .parse()
                    .map_err(|_| Error::config(LOCK_WAIT_ENV, "must be a positive integer"))?,
            );
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(OutputFormat::parse(&format).ok_or_else(|| {
                Error::config(
                    OUTPUT_FORMAT_ENV,
                    format!("unknown format '{format}' (expected table/json/csv/tsv)"),
                )
            })?);
        }

        if let Ok(seeds) = env::var(SEED_TABLES_ENV) {
            config.seed_tables = Some(Self::parse_seed_tables(&seeds)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::config(
                field,
                format!("invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"),
            )),
        }
    }

    /// Parse a seed floor plan such as `"1:2, 2:2, 3:4"`.
    ///
    /// Empty entries are skipped; range checks are left to the validator.
    fn parse_seed_tables(s: &str) -> Result<Vec<SeedTable>> {
        let mut seeds = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (number, capacity) = part.split_once(':').ok_or_else(|| {
                Error::config(
                    SEED_TABLES_ENV,
                    format!("expected number:capacity, got '{part}'"),
                )
            })?;
            let number = number.trim().parse().map_err(|_| {
                Error::config(SEED_TABLES_ENV, format!("invalid table number in '{part}'"))
            })?;
            let capacity = capacity.trim().parse().map_err(|_| {
                Error::config(SEED_TABLES_ENV, format!("invalid capacity in '{part}'"))
            })?;

            seeds.push(SeedTable { number, capacity });
        }

        Ok(seeds)
    }
}
