//! Configuration validation.

use std::collections::HashSet;

use crate::config::schema::{Config, SeedTable};
use crate::error::{Error, Result};

/// Validates a merged or single-file configuration.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::config(
                "maximum_lock_wait_seconds",
                "timeout must be greater than 0",
            ));
        }

        if let Some(ref seeds) = config.seed_tables {
            Self::validate_seed_tables(seeds)?;
        }

        Ok(())
    }

    fn validate_seed_tables(seeds: &[SeedTable]) -> Result<()> {
        let mut seen = HashSet::new();

        for seed in seeds {
            if seed.number == 0 {
                return Err(Error::config("seed_tables", "table numbers start at 1"));
            }
            if seed.capacity == 0 {
                return Err(Error::config(
                    "seed_tables",
                    format!("table {} must seat at least one guest", seed.number),
                ));
            }
            if !seen.insert(seed.number) {
                return Err(Error::config(
                    "seed_tables",
                    format!("table {} is listed more than once", seed.number),
                ));
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_positive_lock_wait_accepted(seconds in 1u64..=86_400) {
            let config = Config {
                maximum_lock_wait_seconds: Some(seconds),
                ..Default::default()
            };
            prop_assert!(ConfigValidator::validate(&config).is_ok());
        }

        #[test]
        fn prop_distinct_positive_seeds_accepted(
            numbers in prop::collection::hash_set(1u32..=1000, 0..=20),
            capacity in 1u32..=20,
        ) {
            let seeds = numbers
                .into_iter()
                .map(|number| SeedTable { number, capacity })
                .collect();
            let config = Config {
                seed_tables: Some(seeds),
                ..Default::default()
            };
            prop_assert!(ConfigValidator::validate(&config).is_ok());
        }
    }
}
