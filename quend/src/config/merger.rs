//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use quend::config::{Config, ConfigMerger};
///
/// let low = Config { modes: Some(vec!["CW".into()]), ..Default::default() };
/// let high = Config { modes: Some(vec!["FT8".into()]), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.modes, Some(vec!["FT8".to_string()]));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into a final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Band and mode lists are replaced whole, never concatenated: a
    /// deployment that lists its bands means exactly those bands.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.bands.is_some() {
            target.bands.clone_from(&source.bands);
        }

        if source.modes.is_some() {
            target.modes.clone_from(&source.modes);
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
    }
}
