//! Property-based tests for the performance indicators
//!
//! Properties checked:
//! 1. Every indicator lies in [0, 1] at every threshold
//! 2. A single fold has zero standard deviation
//! 3. At threshold 100 nothing is predicted positive
//! 4. AUC is never NaN, whatever the fold contents

use binperf::{Indicator, PerfAccumulator, Predictions};
use proptest::prelude::*;

fn fold_strategy() -> impl Strategy<Value = Predictions> {
    prop::collection::vec((any::<bool>(), 0.0f64..=1.0), 0..40).prop_map(|pairs| {
        let (ground_truth, probabilities) = pairs.into_iter().unzip();
        Predictions::probabilistic(ground_truth, probabilities)
    })
}

fn hard_fold_strategy() -> impl Strategy<Value = Predictions> {
    prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f64..=1.0), 0..40).prop_map(
        |rows| {
            let mut ground_truth = Vec::new();
            let mut labels = Vec::new();
            let mut scores = Vec::new();
            for (gt, label, score) in rows {
                ground_truth.push(gt);
                labels.push(label);
                scores.push(score);
            }
            Predictions::with_labels(ground_truth, labels, scores)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_indicators_within_unit_interval(folds in prop::collection::vec(fold_strategy(), 1..4)) {
        let mut acc = PerfAccumulator::new(folds.len(), true).unwrap();
        for (fold_id, fold) in folds.iter().enumerate() {
            acc.add_fold(fold_id, fold).unwrap();
        }
        let perf = acc.finalize();

        for threshold in [0u8, 1, 25, 50, 75, 99, 100] {
            for &indicator in perf.indicators() {
                let mean = perf.get_mean(indicator, Some(threshold)).unwrap();
                prop_assert!((0.0..=1.0).contains(&mean), "{indicator} = {mean}");
                prop_assert!(perf.get_std(indicator, Some(threshold)).unwrap() >= 0.0);
            }
        }
        let auc = perf.get_auc().unwrap();
        prop_assert!((0.0..=1.0).contains(&auc));
    }

    #[test]
    fn prop_single_fold_has_zero_std(fold in fold_strategy(), threshold in 0u8..=100) {
        let mut acc = PerfAccumulator::new(1, true).unwrap();
        acc.add_fold(0, &fold).unwrap();
        let perf = acc.finalize();

        for &indicator in perf.indicators() {
            prop_assert_eq!(perf.get_std(indicator, Some(threshold)).unwrap(), 0.0);
        }
        prop_assert_eq!(perf.auc_summary().unwrap().std, 0.0);
    }

    #[test]
    fn prop_nothing_detected_at_full_threshold(fold in fold_strategy()) {
        let mut acc = PerfAccumulator::new(1, true).unwrap();
        acc.add_fold(0, &fold).unwrap();
        let perf = acc.finalize();

        prop_assert_eq!(perf.get_recall(Some(100)).unwrap(), 0.0);
        prop_assert_eq!(perf.get_false_alarm_rate(Some(100)).unwrap(), 0.0);
    }

    #[test]
    fn prop_hard_label_auc_is_finite(fold in hard_fold_strategy()) {
        let mut acc = PerfAccumulator::new(1, false).unwrap();
        acc.add_fold(0, &fold).unwrap();
        let perf = acc.finalize();

        prop_assert!(!perf.get_auc().unwrap().is_nan());
        let accuracy = perf.get_mean(Indicator::Accuracy, None).unwrap();
        prop_assert!((0.0..=1.0).contains(&accuracy));
    }
}
