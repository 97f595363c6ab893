//! Award types.
//!
//! An award is the event under which reservations are scoped. Award records
//! live in the same store as reservations; see
//! [`Database::create_award`](crate::Database::create_award).

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque, stable award identifier.
///
/// # Examples
///
/// ```
/// use quend::AwardId;
///
/// let id: AwardId = "12".parse().unwrap();
/// assert_eq!(id, AwardId::new(12));
/// assert_eq!(id.to_string(), "12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardId(i64);

impl AwardId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AwardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AwardId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| Error::Validation {
                field: "award_id".into(),
                message: format!("'{s}' is not a valid award id"),
            })
    }
}

/// An award record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// Identifier.
    pub id: AwardId,
    /// Unique display name (the special callsign, usually).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Whether new reservations are accepted.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// Validates and trims an award name.
pub(crate) fn clean_award_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: "name".into(),
            message: "award name must be non-empty after trimming whitespace".into(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_id_parse() {
        assert_eq!(" 3 ".parse::<AwardId>().unwrap(), AwardId::new(3));
        assert!("three".parse::<AwardId>().is_err());
    }

    #[test]
    fn test_award_id_serde_is_transparent() {
        let json = serde_json::to_string(&AwardId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_clean_award_name() {
        assert_eq!(clean_award_name("  EG90IARU ").unwrap(), "EG90IARU");
        assert!(clean_award_name("   ").is_err());
    }
}
