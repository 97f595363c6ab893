//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings for concurrent `SQLite` access.

use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// Each manager owns one of these. Several processes or threads may open the
/// same file; the engine's write lock serializes their mutations.
///
/// # Examples
///
/// ```no_run
/// use quend::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/quend.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access and enable foreign keys
    /// - Configure busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file is missing and `auto_create` is disabled
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), std::path::Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // busy_timeout goes first so the remaining pragmas wait on a locked file
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode returns a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns the configuration this connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the busy timeout this connection was opened with.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.config.busy_timeout
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");
        assert!(!path.parent().unwrap().exists());

        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_missing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("test.db");
        let err = Database::open(DatabaseConfig::new(&path).without_auto_create()).unwrap_err();
        assert!(matches!(err, Error::DataDirectoryNotFound { .. }));
    }

    #[test]
    fn test_database_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        let result = db.connection().execute("CREATE TABLE test (id INTEGER)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_busy_timeout_accessor() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("test.db"))
            .with_busy_timeout(Duration::from_millis(250));
        let db = Database::open(config).unwrap();
        assert_eq!(db.busy_timeout(), Duration::from_millis(250));
    }
}
