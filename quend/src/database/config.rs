//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "quend.db";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "QUEND_DATA_DIR";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use quend::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/quend.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a statement waits on the engine lock before failing.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Disables creating the database file when it is missing.
    #[must_use]
    pub const fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use quend::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/quend.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.quend`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".quend"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the data directory from `QUEND_DATA_DIR` or the default.
///
/// # Errors
///
/// Returns an error if `QUEND_DATA_DIR` is unset and the home directory
/// cannot be determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$QUEND_DATA_DIR/quend.db` if `QUEND_DATA_DIR` is set
/// 2. `~/.quend/quend.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `QUEND_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
