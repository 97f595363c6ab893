//! Error types for the quend library.
//!
//! This module provides the error taxonomy for every reservation operation,
//! using `thiserror` for ergonomic error handling. Storage failures are
//! translated into this taxonomy before they reach callers.

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::award::AwardId;
use crate::operator::{Callsign, Holder};
use crate::resource::Channel;

/// Result type alias for operations that may fail with a quend error.
///
/// # Examples
///
/// ```
/// use quend::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the quend library.
#[derive(Debug, Error)]
pub enum Error {
    /// A band or mode outside the configured catalog was requested.
    #[error("invalid resource {band}/{mode}: {reason}")]
    InvalidResource {
        /// The band as supplied by the caller.
        band: String,
        /// The mode as supplied by the caller.
        mode: String,
        /// Which part was rejected.
        reason: String,
    },

    /// The award exists but is not accepting new reservations.
    #[error("award {award_id} is not active")]
    AwardInactive {
        /// The inactive award.
        award_id: AwardId,
    },

    /// The requested channel is already held by another operator.
    #[error("{channel} in award {award_id} is already blocked by {holder}")]
    Conflict {
        /// The award the channel belongs to.
        award_id: AwardId,
        /// The contested channel.
        channel: Channel,
        /// Who currently holds the channel.
        holder: Holder,
        /// The requester's previous channel, released by the attempt.
        released: Option<Channel>,
    },

    /// An unblock was attempted on a channel held by someone else.
    #[error("{channel} in award {award_id} is blocked by {holder}, not by {requester}")]
    NotOwner {
        /// The award the channel belongs to.
        award_id: AwardId,
        /// The channel that was targeted.
        channel: Channel,
        /// The actual holder.
        holder: Holder,
        /// The operator who asked for the release.
        requester: Callsign,
    },

    /// A privileged operation was attempted without the admin capability.
    #[error("{callsign} is not allowed to {action}")]
    Unauthorized {
        /// The operator who attempted the operation.
        callsign: Callsign,
        /// What was attempted.
        action: String,
    },

    /// The store did not complete the transaction within the busy timeout.
    #[error("store did not respond within {millis}ms")]
    StoreTimeout {
        /// The configured bound in milliseconds.
        millis: u64,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: std::path::PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Translates a raw storage error into the reservation taxonomy.
    ///
    /// Busy/locked engines become [`Error::StoreTimeout`] and foreign-key
    /// violations become [`Error::NotFound`]; everything else is passed
    /// through as [`Error::Database`].
    #[must_use]
    pub fn from_store(err: rusqlite::Error, busy_timeout_millis: u64) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Self::StoreTimeout {
                millis: busy_timeout_millis,
            },
            Some(ErrorCode::ConstraintViolation) if is_foreign_key_violation(&err) => {
                Self::NotFound {
                    resource: "award or operator referenced by reservation".into(),
                }
            }
            _ => Self::Database(err),
        }
    }

    /// Applies [`Error::from_store`] to a wrapped storage error and passes
    /// every other variant through unchanged.
    #[must_use]
    pub(crate) fn into_store_error(self, busy_timeout_millis: u64) -> Self {
        match self {
            Self::Database(err) => Self::from_store(err, busy_timeout_millis),
            other => other,
        }
    }

    /// Returns true for refusals that follow from the reservation rules
    /// rather than from a failure of the system.
    ///
    /// # Examples
    ///
    /// ```
    /// use quend::{AwardId, Error};
    ///
    /// let err = Error::AwardInactive { award_id: AwardId::new(1) };
    /// assert!(err.is_refusal());
    /// assert!(!Error::StoreTimeout { millis: 5000 }.is_refusal());
    /// ```
    #[must_use]
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::InvalidResource { .. }
                | Self::AwardInactive { .. }
                | Self::Conflict { .. }
                | Self::NotOwner { .. }
                | Self::Unauthorized { .. }
        )
    }

    /// Returns true if the error is [`Error::Conflict`].
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Checks whether a constraint failure came from a UNIQUE index or a
/// non-rowid primary key.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
