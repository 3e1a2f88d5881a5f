//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::forest::MaxFeatures;
use proptest::prelude::*;

fn arb_max_features() -> impl Strategy<Value = MaxFeatures> {
    prop_oneof![
        Just(MaxFeatures::Sqrt),
        Just(MaxFeatures::All),
        (1usize..8).prop_map(MaxFeatures::Count),
    ]
}

fn arb_valid_config() -> impl Strategy<Value = PipelineConfig> {
    (
        1usize..500,        // n_trees
        1usize..32,         // max_depth
        arb_max_features(), // max_features
        2usize..20,         // min_samples_split
        0.01f64..0.99,      // test_fraction
        any::<u64>(),       // seed
    )
        .prop_map(
            |(n_trees, max_depth, max_features, min_samples_split, test_fraction, seed)| {
                PipelineConfig {
                    training: TrainingParams {
                        n_trees,
                        max_depth,
                        max_features,
                        min_samples_split,
                        test_fraction,
                        seed,
                    },
                    ..Default::default()
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_zero_trees_fails(config in arb_valid_config()) {
        let mut config = config;
        config.training.n_trees = 0;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidTreeCount(0))
        ));
    }

    #[test]
    fn prop_fraction_outside_unit_interval_fails(
        config in arb_valid_config(),
        fraction in prop_oneof![-10.0f64..=0.0, 1.0f64..10.0],
    ) {
        let mut config = config;
        config.training.test_fraction = fraction;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidTestFraction(_))
        ));
    }

    #[test]
    fn prop_small_min_samples_split_fails(config in arb_valid_config(), split in 0usize..2) {
        let mut config = config;
        config.training.min_samples_split = split;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidMinSamplesSplit(_))
        ));
    }
}
