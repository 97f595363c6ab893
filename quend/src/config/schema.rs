//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; the
//! accessor methods supply the built-in defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::{ResourceCatalog, DEFAULT_BANDS, DEFAULT_MODES};

/// Default bound on how long a store operation waits for the engine lock.
pub const DEFAULT_MAXIMUM_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use quend::config::Config;
///
/// let config = Config {
///     bands: Some(vec!["2m".to_string(), "70cm".to_string()]),
///     modes: Some(vec!["FM".to_string()]),
///     ..Default::default()
/// };
/// let catalog = config.catalog().unwrap();
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Bands operators may block, in display order.
    pub bands: Option<Vec<String>>,

    /// Modes operators may block, in display order.
    pub modes: Option<Vec<String>>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Refuse to create the database when it does not exist yet.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Builds the resource catalog from the configured bands and modes,
    /// falling back to the built-in lists for whichever is unset.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a configured list is empty or has
    /// blank or duplicate entries.
    pub fn catalog(&self) -> Result<ResourceCatalog> {
        let bands = self
            .bands
            .clone()
            .unwrap_or_else(|| DEFAULT_BANDS.iter().map(ToString::to_string).collect());
        let modes = self
            .modes
            .clone()
            .unwrap_or_else(|| DEFAULT_MODES.iter().map(ToString::to_string).collect());
        ResourceCatalog::new(bands, modes)
    }

    /// Returns the configured lock wait, or the default.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_MAXIMUM_LOCK_WAIT_SECONDS),
        )
    }

    /// Returns true if automatic database creation is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}
