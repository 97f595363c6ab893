//! Data directory initialization.
//!
//! Creates the data directory and database explicitly, optionally writes a
//! commented configuration template and registers the first admin.

use std::fs;
use std::path::{Path, PathBuf};

use crate::database::DATABASE_FILE_NAME;
use crate::error::{Error, Result};
use crate::operator::Callsign;
use crate::{Database, DatabaseConfig};

/// Options for data directory initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a configuration template.
    pub create_config: bool,
    /// First admin to register, with display name.
    pub admin: Option<(Callsign, String)>,
}

impl InitOptions {
    /// Creates new initialization options.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            admin: None,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write the configuration template.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Registers an admin operator in the new database.
    #[must_use]
    pub fn with_admin(mut self, callsign: Callsign, name: impl Into<String>) -> Self {
        self.admin = Some((callsign, name.into()));
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
    /// Whether the configuration template was written.
    pub config_created: bool,
    /// The admin registered, if any.
    pub admin_created: Option<Callsign>,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

/// Configuration template written by `with_create_config`.
const DEFAULT_CONFIG_TEMPLATE: &str = r"# quend configuration file
# Uncomment to override the built-in values.

# Bands operators may block, in display order
# bands: [160m, 80m, 60m, 40m, 30m, 20m, 17m, 15m, 12m, 10m, 8m, 6m, 2m, 70cm, SAT]

# Modes operators may block, in display order
# modes: [CW, SSB, FT8, FT4, RTTY]

# Maximum lock wait time in seconds (default: 5)
# maximum_lock_wait_seconds: 5

# Refuse to create the database implicitly
# disable_autoinit: false
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database already exists and `overwrite` is false
/// - The database cannot be created
/// - The configuration template cannot be written
/// - The admin cannot be registered
///
/// # Examples
///
/// ```no_run
/// use quend::init::{init_data_dir, InitOptions};
/// use quend::Callsign;
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/quend-test"))
///     .with_create_config(true)
///     .with_admin(Callsign::parse("EA1ADM").unwrap(), "Admin");
///
/// let result = init_data_dir(&options).unwrap();
/// println!("Database created: {}", result.database_created);
/// ```
pub fn init_data_dir(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        admin_created: None,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        remove_database_files(&db_path)?;
    }

    let db = Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;

    if let Some((callsign, name)) = &options.admin {
        Database::insert_operator(db.connection(), callsign, name, true)?;
        result.admin_created = Some(callsign.clone());
    }

    if options.create_config {
        let config_path = options.data_dir.join(crate::config::loader::USER_CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    log::info!("initialized data directory {}", options.data_dir.display());
    Ok(result)
}

/// Removes the database file and its WAL side files.
fn remove_database_files(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut side = db_path.as_os_str().to_owned();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            fs::remove_file(side)?;
        }
    }
    Ok(())
}
