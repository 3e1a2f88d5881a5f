//! Property tests for policy evaluation metrics
//!
//! Ensures evaluation metrics satisfy mathematical invariants:
//! - Metrics bounded to [0, 1]
//! - No NaN or Infinity values
//! - Confusion matrix invariants
//! - Forest predictions stay valid classes

use irrigate::eval::{ClassificationReport, ConfusionMatrix};
use irrigate::forest::{ForestParams, RandomForest};
use proptest::collection::vec;
use proptest::prelude::*;

const LABELS: [&str; 2] = ["0", "1"];

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Generate pair of prediction/true binary labels with same length
fn label_pair(len: std::ops::Range<usize>) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    len.prop_flat_map(|l| (vec(0..2usize, l), vec(0..2usize, l)))
}

fn bounded(x: f64) -> bool {
    x.is_finite() && (0.0..=1.0).contains(&x)
}

// =============================================================================
// Classification Metric Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn prop_metrics_bounded((y_pred, y_true) in label_pair(0..200)) {
        let report = ClassificationReport::from_predictions(&y_pred, &y_true, &LABELS);
        prop_assert!(bounded(report.accuracy));
        for m in report.classes.iter().chain([&report.macro_avg, &report.weighted_avg]) {
            prop_assert!(bounded(m.precision), "precision {}", m.precision);
            prop_assert!(bounded(m.recall), "recall {}", m.recall);
            prop_assert!(bounded(m.f1), "f1 {}", m.f1);
        }
    }

    #[test]
    fn prop_perfect_predictions((_, y_true) in label_pair(1..200)) {
        let report = ClassificationReport::from_predictions(&y_true, &y_true, &LABELS);
        prop_assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn prop_confusion_matrix_sums((y_pred, y_true) in label_pair(0..200)) {
        let cm = ConfusionMatrix::from_predictions(&y_pred, &y_true, 2);
        prop_assert_eq!(cm.total(), y_true.len());
        prop_assert_eq!(cm.support(0) + cm.support(1), y_true.len());
        for class in 0..2 {
            prop_assert_eq!(
                cm.true_positives(class) + cm.false_negatives(class),
                cm.support(class)
            );
        }
    }

    #[test]
    fn prop_support_matches_truth((y_pred, y_true) in label_pair(0..200)) {
        let report = ClassificationReport::from_predictions(&y_pred, &y_true, &LABELS);
        let on = y_true.iter().filter(|&&y| y == 1).count();
        prop_assert_eq!(report.classes[1].support, on);
        prop_assert_eq!(report.classes[0].support, y_true.len() - on);
        prop_assert_eq!(report.weighted_avg.support, y_true.len());
    }
}

// =============================================================================
// Forest Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_forest_predicts_valid_class(
        rows in vec((0.0f64..50.0, 0.0f64..100.0, 0.0f64..1000.0, 0..2usize), 2..60),
        query in (-100.0f64..200.0, -100.0f64..200.0, -100.0f64..2000.0),
        seed in any::<u64>(),
    ) {
        let x: Vec<Vec<f64>> = rows.iter().map(|&(t, h, s, _)| vec![t, h, s]).collect();
        let y: Vec<usize> = rows.iter().map(|r| r.3).collect();
        let params = ForestParams { n_trees: 5, seed, ..ForestParams::default() };
        let forest = RandomForest::fit(&x, &y, &params).unwrap();

        let features = [query.0, query.1, query.2];
        let proba = forest.predict_proba(&features);
        prop_assert_eq!(proba.len(), 2);
        prop_assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        let prediction = forest.predict_with_votes(&features);
        prop_assert!(prediction.class < 2);
        prop_assert_eq!(prediction.votes.iter().sum::<usize>(), 5);
        prop_assert!(forest.check_structure().is_ok());
    }

    #[test]
    fn prop_forest_fit_is_deterministic(
        rows in vec((0.0f64..50.0, 0.0f64..100.0, 0.0f64..1000.0, 0..2usize), 2..40),
        seed in any::<u64>(),
    ) {
        let x: Vec<Vec<f64>> = rows.iter().map(|&(t, h, s, _)| vec![t, h, s]).collect();
        let y: Vec<usize> = rows.iter().map(|r| r.3).collect();
        let params = ForestParams { n_trees: 4, seed, ..ForestParams::default() };
        prop_assert_eq!(
            RandomForest::fit(&x, &y, &params).unwrap(),
            RandomForest::fit(&x, &y, &params).unwrap()
        );
    }
}
