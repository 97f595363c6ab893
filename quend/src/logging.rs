//! Logging infrastructure for the quend library.
//!
//! Library code writes diagnostics through the `log` facade. This module
//! provides the stderr backend the CLI installs at startup, with three
//! coarse verbosity levels.

use std::env;
use std::fmt;

use log::{LevelFilter, Metadata, Record};

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "QUEND_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use quend::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Only errors.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything, including info and debug records.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use quend::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// Returns the `log` filter this level admits.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Error,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr `log` backend.
///
/// # Examples
///
/// ```
/// use log::Log;
/// use quend::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// let info = log::Metadata::builder().level(log::Level::Info).build();
/// assert!(!logger.enabled(&info));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the process-wide `log` backend.
    ///
    /// Only the first call in a process takes effect; later calls return
    /// an error and leave the installed logger in place.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger was already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.filter();
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(filter);
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Builds a logger from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet)
/// 2. `QUEND_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// If both `verbose` and `quiet` are true, `verbose` takes precedence.
///
/// # Examples
///
/// ```
/// use quend::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var(LOG_MODE_ENV) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}
