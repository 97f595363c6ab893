//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z0-9]{1,6}", 1..6).prop_map(|set| set.into_iter().collect())
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(list_strategy()),
        prop::option::of(list_strategy()),
        prop::option::of(1u64..600),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(bands, modes, wait, autoinit)| Config {
            bands,
            modes,
            maximum_lock_wait_seconds: wait,
            disable_autoinit: autoinit,
        })
}

proptest! {
    // Merging a config onto itself changes nothing.
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Every field set in the higher layer survives the merge unchanged.
    #[test]
    fn higher_layer_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.bands, high.bands.or(low.bands));
        prop_assert_eq!(merged.modes, high.modes.or(low.modes));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
    }

    // Generated configs are valid, and so is any merge of two of them.
    #[test]
    fn merge_preserves_validity(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        let mut merged = low;
        ConfigMerger::merge_into(&mut merged, &high);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
        prop_assert!(merged.catalog().is_ok());
    }
}
