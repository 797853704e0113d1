//! ROC curve and area under the curve

use std::cmp::Ordering;

/// A single point on the ROC curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    /// Score threshold at which this point is computed
    pub threshold: f64,
    /// False positive rate: FP / (FP + TN)
    pub fpr: f64,
    /// True positive rate: TP / (TP + FN)
    pub tpr: f64,
}

/// ROC curve with its trapezoidal AUC
#[derive(Debug, Clone)]
pub struct RocCurve {
    /// Points from (0, 0) to (1, 1), one per distinct score
    pub points: Vec<RocPoint>,
    /// Area under the curve
    pub auc: f64,
}

/// Compute the ROC curve of `scores` against binary `ground_truth`
///
/// Walks the distinct scores in descending order, emitting one point per
/// score after all tied instances have been counted. Returns `None` when
/// the curve is undefined: empty or misaligned input, a NaN score, or a
/// ground truth without positive or without negative instances.
pub fn roc_curve(ground_truth: &[bool], scores: &[f64]) -> Option<RocCurve> {
    if ground_truth.is_empty() || ground_truth.len() != scores.len() {
        return None;
    }
    if scores.iter().any(|s| s.is_nan()) {
        return None;
    }

    let positives = ground_truth.iter().filter(|&&t| t).count();
    let negatives = ground_truth.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let p = positives as f64;
    let n = negatives as f64;

    let mut points = Vec::with_capacity(order.len() + 1);
    points.push(RocPoint {
        threshold: f64::INFINITY,
        fpr: 0.0,
        tpr: 0.0,
    });

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut i = 0;
    while i < order.len() {
        let current = scores[order[i]];
        while i < order.len() && scores[order[i]].total_cmp(&current) == Ordering::Equal {
            if ground_truth[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        points.push(RocPoint {
            threshold: current,
            fpr: fp as f64 / n,
            tpr: tp as f64 / p,
        });
    }

    let auc = points
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr).abs() * (w[1].tpr + w[0].tpr) / 2.0)
        .sum();

    Some(RocCurve { points, auc })
}

/// Area under the ROC curve, `None` when the curve is undefined
pub fn roc_auc(ground_truth: &[bool], scores: &[f64]) -> Option<f64> {
    roc_curve(ground_truth, scores).map(|curve| curve.auc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_perfect_separation() {
        let truth = [true, true, false, false];
        let scores = [0.9, 0.8, 0.2, 0.1];
        assert_eq!(roc_auc(&truth, &scores), Some(1.0));
    }

    #[test]
    fn test_inverted_ranking() {
        let truth = [false, false, true, true];
        let scores = [0.9, 0.8, 0.2, 0.1];
        assert_eq!(roc_auc(&truth, &scores), Some(0.0));
    }

    #[test]
    fn test_known_value() {
        // Pairs (pos, neg) ranked correctly: 3 of 4
        let truth = [true, false, true, false];
        let scores = [0.9, 0.8, 0.7, 0.1];
        let auc = roc_auc(&truth, &scores).unwrap();
        assert!((auc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_ties_count_half() {
        let truth = [true, false];
        let scores = [0.5, 0.5];
        let auc = roc_auc(&truth, &scores).unwrap();
        assert!((auc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_curve_endpoints() {
        let truth = [true, false, true, false, true];
        let scores = [0.3, 0.4, 0.9, 0.1, 0.6];
        let curve = roc_curve(&truth, &scores).unwrap();

        let first = curve.points.first().unwrap();
        let last = curve.points.last().unwrap();
        assert_eq!((first.fpr, first.tpr), (0.0, 0.0));
        assert_eq!((last.fpr, last.tpr), (1.0, 1.0));
    }

    #[test]
    fn test_nan_score_is_undefined() {
        let truth = [true, false, true];
        assert!(roc_auc(&truth, &[0.9, f64::NAN, 0.2]).is_none());
        assert!(roc_auc(&truth, &[f64::NAN; 3]).is_none());
    }

    #[test]
    fn test_infinite_scores_rank_at_the_ends() {
        let truth = [true, false, true, false];
        let scores = [f64::INFINITY, f64::NEG_INFINITY, 0.5, 0.5];
        let curve = roc_curve(&truth, &scores).unwrap();
        // +inf, tie at 0.5, -inf, plus the origin
        assert_eq!(curve.points.len(), 4);
        assert!((curve.auc - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_curves() {
        assert!(roc_auc(&[], &[]).is_none());
        assert!(roc_auc(&[false, false], &[0.1, 0.9]).is_none());
        assert!(roc_auc(&[true, true], &[0.1, 0.9]).is_none());
        assert!(roc_auc(&[true, false], &[0.1]).is_none());
    }

    /// Fraction of (positive, negative) pairs ranked correctly, ties count half
    fn pairwise_auc(truth: &[bool], scores: &[f64]) -> f64 {
        let (pos, neg): (Vec<(bool, f64)>, Vec<(bool, f64)>) = truth
            .iter()
            .copied()
            .zip(scores.iter().copied())
            .partition(|(t, _)| *t);

        let mut correct = 0.0;
        for (_, p) in &pos {
            for (_, n) in &neg {
                if p > n {
                    correct += 1.0;
                } else if p == n {
                    correct += 0.5;
                }
            }
        }
        correct / (pos.len() * neg.len()) as f64
    }

    proptest! {
        /// Property: the trapezoid AUC equals the pairwise ranking estimate.
        #[test]
        fn auc_matches_pairwise_ranking(
            rows in prop::collection::vec((any::<bool>(), 0u8..=20), 2..30)
        ) {
            let truth: Vec<bool> = rows.iter().map(|(t, _)| *t).collect();
            let scores: Vec<f64> = rows.iter().map(|(_, s)| f64::from(*s) / 20.0).collect();

            match roc_auc(&truth, &scores) {
                Some(auc) => {
                    prop_assert!((0.0..=1.0).contains(&auc));
                    prop_assert!((auc - pairwise_auc(&truth, &scores)).abs() < 1e-9);
                }
                None => prop_assert!(truth.iter().all(|&t| t) || truth.iter().all(|&t| !t)),
            }
        }
    }
}
