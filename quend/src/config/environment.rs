//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `QUEND_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Comma-separated band list.
pub const BANDS_ENV: &str = "QUEND_BANDS";
/// Comma-separated mode list.
pub const MODES_ENV: &str = "QUEND_MODES";
/// Lock wait in seconds.
pub const LOCK_WAIT_ENV: &str = "QUEND_MAXIMUM_LOCK_WAIT_SECONDS";
/// Boolean that disables automatic database creation.
pub const DISABLE_AUTOINIT_ENV: &str = "QUEND_DISABLE_AUTOINIT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use quend::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric lock wait or an unrecognized boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(bands) = env::var(BANDS_ENV) {
            config.bands = Some(Self::parse_list(&bands));
        }

        if let Ok(modes) = env::var(MODES_ENV) {
            config.modes = Some(Self::parse_list(&modes));
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Split a comma-separated list, dropping empty items.
    ///
    /// An all-empty value yields an empty list, which validation rejects.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_bool_variants() {
        for t in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("test", t).unwrap());
        }
        for f in ["false", "0", "NO", "off"] {
            assert!(!EnvironmentConfig::parse_bool("test", f).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            EnvironmentConfig::parse_list(" 40m, 20m ,,15m"),
            vec!["40m", "20m", "15m"]
        );
        assert!(EnvironmentConfig::parse_list(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn test_apply_overrides() {
        env::set_var(BANDS_ENV, "2m,70cm");
        env::set_var(LOCK_WAIT_ENV, "9");
        env::set_var(DISABLE_AUTOINIT_ENV, "yes");

        let mut config = Config {
            modes: Some(vec!["CW".to_string()]),
            ..Default::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();

        env::remove_var(BANDS_ENV);
        env::remove_var(LOCK_WAIT_ENV);
        env::remove_var(DISABLE_AUTOINIT_ENV);

        assert_eq!(
            config.bands,
            Some(vec!["2m".to_string(), "70cm".to_string()])
        );
        assert_eq!(config.modes, Some(vec!["CW".to_string()]));
        assert_eq!(config.maximum_lock_wait_seconds, Some(9));
        assert_eq!(config.disable_autoinit, Some(true));
    }

    #[test]
    #[serial]
    fn test_invalid_lock_wait() {
        env::set_var(LOCK_WAIT_ENV, "soon");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        env::remove_var(LOCK_WAIT_ENV);
        assert!(result.is_err());
    }
}
