//! Property-based tests for configuration merging and serialization.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, SeedTable};
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn seed_strategy() -> impl Strategy<Value = Vec<SeedTable>> {
    prop::collection::vec(
        (1u32..=200, 1u32..=20).prop_map(|(number, capacity)| SeedTable { number, capacity }),
        0..=6,
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=600),
        prop::option::of(output_format_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(seed_strategy()),
    )
        .prop_map(
            |(maximum_lock_wait_seconds, output_format, disable_autoinit, seed_tables)| Config {
                maximum_lock_wait_seconds,
                output_format,
                disable_autoinit,
                seed_tables,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Every field set on the higher source wins; unset fields fall through.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.seed_tables, high.seed_tables.or(low.seed_tables));
    }

    // Merging the same source twice changes nothing more.
    #[test]
    fn config_merge_idempotent(base in config_strategy(), source in config_strategy()) {
        let mut once = base;
        ConfigMerger::merge_into(&mut once, &source);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &source);
        prop_assert_eq!(once, twice);
    }

    // An empty config is the identity for merging.
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // YAML written by serde_yaml loads back to the same config.
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
