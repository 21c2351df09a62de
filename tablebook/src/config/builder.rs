//! Assembles the effective configuration from every source.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Builds a [`Config`] by layering files, environment and overrides.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maximum_lock_wait_seconds: Some(15),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.maximum_lock_wait_seconds, Some(15));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads files and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Does not read any configuration file.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Does not apply `TABLEBOOK_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Starts project file discovery here instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Reads the user config from this data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// Each file is validated on its own first so that an error names the
    /// file it came from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a file, variable or the merged
    /// result is invalid, or [`Error::Io`] if the current directory cannot be
    /// determined.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config).map_err(|e| match e {
                    Error::InvalidConfig { location, message } => Error::config(
                        source.path.display().to_string(),
                        format!("{location}: {message}"),
                    ),
                    other => other,
                })?;
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, &overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, USER_CONFIG_FILE};
    use crate::config::schema::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_precedence() {
        let data = TempDir::new().unwrap();
        fs::write(
            data.path().join(USER_CONFIG_FILE),
            "maximum_lock_wait_seconds: 3\noutput_format: csv\n",
        )
        .unwrap();
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "output_format: tsv\n").unwrap();
        fs::write(project.path().join(LOCAL_CONFIG_FILE), "disable_autoinit: true\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_working_dir(project.path())
            .with_data_dir(data.path())
            .build()
            .unwrap();

        assert_eq!(config.maximum_lock_wait_seconds, Some(3));
        assert_eq!(config.output_format, Some(OutputFormat::Tsv));
        assert_eq!(config.disable_autoinit, Some(true));
    }

    #[test]
    fn test_overrides_win() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "output_format: tsv\n").unwrap();
        let data = TempDir::new().unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_working_dir(project.path())
            .with_data_dir(data.path())
            .with_config(Config {
                output_format: Some(OutputFormat::Json),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_invalid_file_names_its_path() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "seed_tables:\n  - number: 1\n    capacity: 0\n",
        )
        .unwrap();
        let data = TempDir::new().unwrap();

        let err = ConfigBuilder::new()
            .skip_env()
            .with_working_dir(project.path())
            .with_data_dir(data.path())
            .build()
            .unwrap_err();
        match err {
            Error::InvalidConfig { location, .. } => assert!(location.ends_with(PROJECT_CONFIG_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }
}
