//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, identity
//! resolution, and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use quend::database::DATABASE_FILE_NAME;
use quend::{
    AwardId, Callsign, Config, ConfigBuilder, Database, DatabaseConfig, Identity,
    ReservationManager,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Callsign of the operator running the command.
    pub as_operator: Option<String>,
}

/// Output format for listing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Deployment `quend.yaml` found from the working directory
/// 3. User `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the data directory from global options.
///
/// Priority: `--data-dir` (or `QUEND_DATA_DIR` through clap) > `~/.quend`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => quend::database::resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let autoinit_disabled = global.disable_autoinit || config.autoinit_disabled();
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()));
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(timeout);
    let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    Database::open(db_config).map_err(|e| match e {
        quend::Error::Database(err) => quend::Error::from_store(err, millis).into(),
        other => other.into(),
    })
}

/// Load configuration, open the database, and build a manager over the
/// configured band/mode catalog.
pub fn open_manager(global: &GlobalOptions) -> Result<ReservationManager, CliError> {
    let config = load_configuration(global)?;
    let catalog = config
        .catalog()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let db = open_database(global, &config)?;
    Ok(ReservationManager::new(db, catalog))
}

/// Parse a callsign given on the command line.
pub fn parse_callsign(raw: &str) -> Result<Callsign, CliError> {
    Callsign::parse(raw).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Resolve the caller's identity from `--as` and the operator directory.
///
/// The admin flag comes from the stored operator record, never from the
/// command line.
pub fn resolve_identity(
    global: &GlobalOptions,
    manager: &ReservationManager,
) -> Result<Identity, CliError> {
    let raw = global.as_operator.as_deref().ok_or_else(|| {
        CliError::InvalidArguments(
            "this command needs an operator: pass --as <CALLSIGN> or set QUEND_OPERATOR".into(),
        )
    })?;
    let callsign = parse_callsign(raw)?;
    Ok(manager.get_operator(&callsign)?.identity())
}

/// Resolve an award given by name or by numeric id.
///
/// Names take precedence, so an award named "2025" is found by name even
/// though the text also parses as an id.
pub fn resolve_award(manager: &ReservationManager, award: &str) -> Result<AwardId, CliError> {
    match manager.find_award(award) {
        Ok(found) => Ok(found.id),
        Err(not_found @ quend::Error::NotFound { .. }) => award
            .trim()
            .parse::<AwardId>()
            .map_err(|_| CliError::from(not_found)),
        Err(e) => Err(e.into()),
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Print `message` unless `--quiet` was given.
pub fn report(global: &GlobalOptions, message: &str) {
    if !global.quiet {
        println!("{message}");
    }
}
