//! Band/mode vocabulary and canonical resource keys.
//!
//! The set of lockable channels is injected configuration: a
//! [`ResourceCatalog`] lists the bands and modes a deployment supports, and
//! [`ResourceCatalog::normalize`] is the only way to obtain a [`Channel`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::award::AwardId;
use crate::error::{Error, Result};

/// Bands supported by the default catalog, highest wavelength first.
pub const DEFAULT_BANDS: [&str; 15] = [
    "160m", "80m", "60m", "40m", "30m", "20m", "17m", "15m", "12m", "10m", "8m", "6m", "2m",
    "70cm", "SAT",
];

/// Modes supported by the default catalog.
pub const DEFAULT_MODES: [&str; 5] = ["CW", "SSB", "FT8", "FT4", "RTTY"];

/// A band/mode pair drawn from a [`ResourceCatalog`].
///
/// Channels compare by exact tuple equality. The spelling is always the
/// catalog's canonical one, so two channels normalized from `"20M"` and
/// `"20m"` are equal.
///
/// # Examples
///
/// ```
/// use quend::ResourceCatalog;
///
/// let catalog = ResourceCatalog::default();
/// let channel = catalog.normalize(" 20M ", "cw").unwrap();
/// assert_eq!(channel.band(), "20m");
/// assert_eq!(channel.mode(), "CW");
/// assert_eq!(format!("{channel}"), "20m/CW");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Channel {
    band: String,
    mode: String,
}

impl Channel {
    /// Returns the canonical band name.
    #[must_use]
    pub fn band(&self) -> &str {
        &self.band
    }

    /// Returns the canonical mode name.
    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Rebuilds a channel from values already stored in the database.
    ///
    /// Stored values were normalized on the way in, so no catalog lookup is
    /// performed here.
    pub(crate) fn from_stored(band: String, mode: String) -> Self {
        Self { band, mode }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.band, self.mode)
    }
}

/// The unique addressable unit: a channel within one award.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    /// The award the channel is scoped to.
    pub award_id: AwardId,
    /// The band/mode pair.
    pub channel: Channel,
}

impl ResourceKey {
    /// Creates a key for `channel` within `award_id`.
    #[must_use]
    pub const fn new(award_id: AwardId, channel: Channel) -> Self {
        Self { award_id, channel }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "award {}: {}", self.award_id, self.channel)
    }
}

/// The configured band and mode vocabularies.
///
/// Order is preserved and used when enumerating the full grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCatalog {
    bands: Vec<String>,
    modes: Vec<String>,
}

impl ResourceCatalog {
    /// Creates a catalog from explicit band and mode lists.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either list is empty, contains a blank
    /// entry, or repeats an entry (compared case-insensitively).
    ///
    /// # Examples
    ///
    /// ```
    /// use quend::ResourceCatalog;
    ///
    /// let catalog = ResourceCatalog::new(
    ///     vec!["40m".to_string(), "20m".to_string()],
    ///     vec!["CW".to_string()],
    /// ).unwrap();
    /// assert_eq!(catalog.bands().len(), 2);
    ///
    /// assert!(ResourceCatalog::new(vec![], vec!["CW".to_string()]).is_err());
    /// ```
    pub fn new(bands: Vec<String>, modes: Vec<String>) -> Result<Self> {
        let bands = Self::clean_list("bands", bands)?;
        let modes = Self::clean_list("modes", modes)?;
        Ok(Self { bands, modes })
    }

    fn clean_list(field: &str, values: Vec<String>) -> Result<Vec<String>> {
        if values.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "at least one entry is required".into(),
            });
        }

        let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "entries cannot be empty or only whitespace".into(),
                });
            }
            if cleaned.iter().any(|c| c.eq_ignore_ascii_case(trimmed)) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("duplicate entry '{trimmed}'"),
                });
            }
            cleaned.push(trimmed.to_string());
        }
        Ok(cleaned)
    }

    /// Returns the configured bands in order.
    #[must_use]
    pub fn bands(&self) -> &[String] {
        &self.bands
    }

    /// Returns the configured modes in order.
    #[must_use]
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Validates a band/mode pair and returns its canonical channel.
    ///
    /// Input is trimmed and matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResource`] if the band or mode is not in the
    /// catalog.
    pub fn normalize(&self, band: &str, mode: &str) -> Result<Channel> {
        let canonical_band = Self::lookup(&self.bands, band);
        let canonical_mode = Self::lookup(&self.modes, mode);

        match (canonical_band, canonical_mode) {
            (Some(b), Some(m)) => Ok(Channel {
                band: b.clone(),
                mode: m.clone(),
            }),
            (None, _) => Err(Error::InvalidResource {
                band: band.to_string(),
                mode: mode.to_string(),
                reason: format!("unknown band '{}'", band.trim()),
            }),
            (Some(_), None) => Err(Error::InvalidResource {
                band: band.to_string(),
                mode: mode.to_string(),
                reason: format!("unknown mode '{}'", mode.trim()),
            }),
        }
    }

    fn lookup<'a>(values: &'a [String], wanted: &str) -> Option<&'a String> {
        let wanted = wanted.trim();
        values.iter().find(|v| v.eq_ignore_ascii_case(wanted))
    }

    /// Enumerates every channel, bands outermost, in configured order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.bands.iter().flat_map(move |band| {
            self.modes.iter().map(move |mode| Channel {
                band: band.clone(),
                mode: mode.clone(),
            })
        })
    }

    /// Returns the number of channels in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len() * self.modes.len()
    }

    /// Returns true if the grid has no channels.
    ///
    /// A catalog built through [`ResourceCatalog::new`] is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.iter().map(ToString::to_string).collect(),
            modes: DEFAULT_MODES.iter().map(ToString::to_string).collect(),
        }
    }
}
