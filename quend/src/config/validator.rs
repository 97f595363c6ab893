//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Longest accepted band or mode name.
pub const MAX_ENTRY_LEN: usize = 16;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use quend::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { modes: Some(vec![]), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete or partial configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref bands) = config.bands {
            Self::validate_entries("bands", bands)?;
        }

        if let Some(ref modes) = config.modes {
            Self::validate_entries("modes", modes)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }

    /// Validate a band or mode vocabulary.
    fn validate_entries(field: &str, entries: &[String]) -> Result<()> {
        if entries.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "At least one entry is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for entry in entries {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "Entries cannot be empty or only whitespace".into(),
                });
            }
            if trimmed.len() > MAX_ENTRY_LEN {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("'{trimmed}' exceeds {MAX_ENTRY_LEN} characters"),
                });
            }
            if trimmed.contains(['/', ',']) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("'{trimmed}' cannot contain '/' or ','"),
                });
            }
            if !seen.insert(trimmed.to_ascii_lowercase()) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("Duplicate entry '{trimmed}'"),
                });
            }
        }

        Ok(())
    }
}
