//! Configuration schema definitions.
//!
//! This module defines the settings tablebook reads from YAML files and the
//! environment: lock waiting, output formatting, database initialization and
//! the floor plan seeded into a fresh database.

use serde::{Deserialize, Serialize};

use crate::table::NewTable;

/// The floor plan `init --seed` creates when no `seed_tables` are configured.
///
/// Each pair is `(table_number, capacity)`.
pub const DEFAULT_SEED_TABLES: [(u32, u32); 8] = [
    (1, 2),
    (2, 2),
    (3, 4),
    (4, 4),
    (5, 6),
    (6, 6),
    (7, 8),
    (8, 8),
];

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields fall
/// through to lower-precedence sources and finally to built-in defaults.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, OutputFormat};
///
/// let config = Config {
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Tables created by `init --seed`.
    pub seed_tables: Option<Vec<SeedTable>>,
}

impl Config {
    /// The seed floor plan, falling back to [`DEFAULT_SEED_TABLES`].
    ///
    /// Entries are expected to have passed validation already; any that
    /// fail to build a [`NewTable`] are dropped.
    #[must_use]
    pub fn seed_floor_plan(&self) -> Vec<NewTable> {
        match &self.seed_tables {
            Some(seeds) => seeds.iter().filter_map(SeedTable::to_new_table).collect(),
            None => DEFAULT_SEED_TABLES
                .iter()
                .filter_map(|&(number, capacity)| NewTable::new(number, capacity).ok())
                .collect(),
        }
    }
}

/// One table in a configured seed floor plan.
///
/// # Examples
///
/// ```
/// use tablebook::config::SeedTable;
///
/// let seed = SeedTable { number: 12, capacity: 4 };
/// assert!(seed.to_new_table().is_some());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SeedTable {
    /// Human-facing table number.
    pub number: u32,
    /// Maximum party size.
    pub capacity: u32,
}

impl SeedTable {
    /// Converts to a registrable table, or `None` if a value is zero.
    #[must_use]
    pub fn to_new_table(&self) -> Option<NewTable> {
        NewTable::new(self.number, self.capacity).ok()
    }
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON envelope output.
    Json,
    /// CSV output.
    Csv,
    /// Tab-separated values output.
    Tsv,
    /// Human-readable aligned table.
    #[default]
    Table,
}

impl OutputFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}
