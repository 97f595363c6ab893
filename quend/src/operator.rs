//! Operator identities and capability tokens.
//!
//! The authentication collaborator hands the core an [`Identity`] for every
//! call; the core never looks up "who is logged in" on its own.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A case-normalized amateur-radio callsign.
///
/// Callsigns are trimmed and uppercased. Only ASCII letters, digits and `/`
/// (portable suffixes such as `EA1AAA/P`) are accepted.
///
/// # Examples
///
/// ```
/// use quend::Callsign;
///
/// let call = Callsign::parse(" ea1aaa/p ").unwrap();
/// assert_eq!(call.as_str(), "EA1AAA/P");
///
/// assert!(Callsign::parse("").is_err());
/// assert!(Callsign::parse("EA1 AAA").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Callsign(String);

impl Callsign {
    /// Maximum accepted length.
    pub const MAX_LEN: usize = 20;

    /// Parses and normalizes a callsign.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the callsign is empty, too long, or
    /// contains characters other than letters, digits and `/`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: "callsign".into(),
                message: "callsign must be non-empty after trimming whitespace".into(),
            });
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(Error::Validation {
                field: "callsign".into(),
                message: format!("callsign cannot exceed {} characters", Self::MAX_LEN),
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '/')
        {
            return Err(Error::Validation {
                field: "callsign".into(),
                message: format!("'{trimmed}' contains characters not allowed in a callsign"),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the normalized callsign.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Callsign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Callsign {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Callsign> for String {
    fn from(call: Callsign) -> Self {
        call.0
    }
}

/// An operator record from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Unique callsign.
    pub callsign: Callsign,
    /// Display name.
    pub name: String,
    /// Whether the operator holds the admin capability.
    pub is_admin: bool,
    /// Registration timestamp.
    pub created_at: SystemTime,
}

impl Operator {
    /// Returns the capability token for this operator.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            callsign: self.callsign.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Who currently holds a channel, as shown to a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    /// The holder's callsign.
    pub callsign: Callsign,
    /// The holder's display name.
    pub name: String,
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.callsign, self.name)
    }
}

/// The authenticated caller of a manager operation.
///
/// Passed explicitly into every call. The admin flag is the capability the
/// auth collaborator grants; the core trusts it as given.
///
/// # Examples
///
/// ```
/// use quend::{Callsign, Identity};
///
/// let op = Identity::operator(Callsign::parse("EA1AAA").unwrap());
/// assert!(!op.is_admin);
///
/// let admin = Identity::admin(Callsign::parse("EA1ADM").unwrap());
/// assert!(admin.is_admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// The caller's callsign.
    pub callsign: Callsign,
    /// Whether the caller holds the admin capability.
    pub is_admin: bool,
}

impl Identity {
    /// An identity without the admin capability.
    #[must_use]
    pub const fn operator(callsign: Callsign) -> Self {
        Self {
            callsign,
            is_admin: false,
        }
    }

    /// An identity with the admin capability.
    #[must_use]
    pub const fn admin(callsign: Callsign) -> Self {
        Self {
            callsign,
            is_admin: true,
        }
    }

    /// Fails with [`Error::Unauthorized`] unless the identity is an admin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] naming `action` when the capability
    /// is absent.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(Error::Unauthorized {
                callsign: self.callsign.clone(),
                action: action.to_string(),
            })
        }
    }
}

/// Validates and trims an operator display name.
pub(crate) fn clean_display_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: "name".into(),
            message: "operator name must be non-empty after trimming whitespace".into(),
        });
    }
    Ok(trimmed.to_string())
}
