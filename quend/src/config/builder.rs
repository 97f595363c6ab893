//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Builds the effective configuration from files, environment and overrides.
///
/// # Examples
///
/// ```
/// use quend::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maximum_lock_wait_seconds: Some(2),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.maximum_lock_wait_seconds, Some(2));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads files from the current directory and
    /// the default data directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where the upward search for `quend.yaml` starts.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `QUEND_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of every other layer.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// Each file is validated on its own so an error names the file that
    /// caused it; the merged result is validated again.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
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
                    Error::Validation { field, message } => Error::Validation {
                        field: format!("{} ({field})", source.path.display()),
                        message,
                    },
                    other => other,
                })?;
                log::debug!("loaded configuration from {}", source.path.display());
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
