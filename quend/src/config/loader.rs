//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading quend configuration files
//! from various locations with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the deployment configuration file searched for upwards from the
/// working directory.
pub const DEPLOYMENT_CONFIG_FILE: &str = "quend.yaml";

/// Name of the per-user configuration file inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use quend::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `<data_dir>/config.yaml` (precedence 1)
    /// 2. The nearest `quend.yaml` walking up from `working_dir` (precedence 2)
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        if let Some(deployment) = Self::discover_deployment_config(working_dir)? {
            sources.push(deployment);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Load the user configuration file, if present.
    ///
    /// If `data_dir` is provided, loads from `{data_dir}/config.yaml`.
    /// Otherwise uses the resolved data directory.
    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => match crate::database::resolve_data_dir() {
                Ok(dir) => dir.join(USER_CONFIG_FILE),
                // No home directory means no user config, not a failure
                Err(_) => return Ok(None),
            },
        };

        if !config_path.is_file() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Walk up from `start_dir` and load the first `quend.yaml` found.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovered file cannot be read or parsed.
    pub fn discover_deployment_config(start_dir: &Path) -> Result<Option<ConfigSource>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join(DEPLOYMENT_CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load_file(&candidate)?;
                return Ok(Some(ConfigSource {
                    path: candidate,
                    precedence: 2,
                    config,
                }));
            }
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load and parse a YAML configuration file.
    ///
    /// A file with nothing but blank lines and comments yields the empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        let has_content = contents.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        if !has_content {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }
}
