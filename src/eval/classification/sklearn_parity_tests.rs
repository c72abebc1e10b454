//! sklearn parity tests for classification metrics
//!
//! These tests verify that our metrics match sklearn reference values
//! to within 1e-12.
//!
//! Reference values computed with sklearn 1.4.0:
//! ```python
//! from sklearn.metrics import (precision_recall_fscore_support,
//!                              precision_score, confusion_matrix)
//! ```

use approx::assert_abs_diff_eq;

use crate::eval::classification::{
    confusion_matrix, precision_recall_fscore_support, Average, MultiClassMetrics,
};

const EPS: f64 = 1e-12;

#[test]
fn test_sklearn_parity_balanced_micro_equals_macro() {
    // sklearn: micro and macro P/R/F = 0.6666666666666666
    let y_true = vec![1, 1, 2, 2, 3, 3, 1, 2, 3];
    let y_pred = vec![1, 2, 2, 3, 3, 1, 1, 2, 3];

    for average in [Average::Micro, Average::Macro, Average::Weighted] {
        let s = precision_recall_fscore_support(&y_pred, &y_true, average).unwrap();
        assert_abs_diff_eq!(s.precision, 0.6666666666666666, epsilon = EPS);
        assert_abs_diff_eq!(s.recall, 0.6666666666666666, epsilon = EPS);
        assert_abs_diff_eq!(s.f1, 0.6666666666666666, epsilon = EPS);
        assert_eq!(s.support, 9);
    }
}

#[test]
fn test_sklearn_parity_imbalanced() {
    // Class 1: TP=3, FP=1, FN=2 -> P=0.75,  R=0.6, F1=0.6667
    // Class 2: TP=1, FP=2, FN=1 -> P=0.333, R=0.5, F1=0.4
    // Class 3: TP=1, FP=0, FN=0 -> P=1,     R=1,   F1=1
    let y_true = vec![1, 1, 1, 1, 1, 2, 2, 3];
    let y_pred = vec![1, 1, 1, 2, 2, 2, 1, 3];

    let macro_ = precision_recall_fscore_support(&y_pred, &y_true, Average::Macro).unwrap();
    assert_abs_diff_eq!(macro_.precision, 0.6944444444444444, epsilon = EPS);
    assert_abs_diff_eq!(macro_.recall, 0.7, epsilon = EPS);
    assert_abs_diff_eq!(macro_.f1, 0.6888888888888888, epsilon = EPS);

    let micro = precision_recall_fscore_support(&y_pred, &y_true, Average::Micro).unwrap();
    assert_abs_diff_eq!(micro.precision, 0.625, epsilon = EPS);
    assert_abs_diff_eq!(micro.recall, 0.625, epsilon = EPS);
    assert_abs_diff_eq!(micro.f1, 0.625, epsilon = EPS);

    let weighted = precision_recall_fscore_support(&y_pred, &y_true, Average::Weighted).unwrap();
    assert_abs_diff_eq!(weighted.precision, 0.6770833333333334, epsilon = EPS);
}

#[test]
fn test_sklearn_parity_precision_per_class() {
    // sklearn: precision_score(..., average=None) = [0.75, 0.33333333, 1.]
    let y_true = vec![1, 1, 1, 1, 1, 2, 2, 3];
    let y_pred = vec![1, 1, 1, 2, 2, 2, 1, 3];

    let metrics = MultiClassMetrics::from_predictions(&y_pred, &y_true).unwrap();
    assert_eq!(metrics.labels, vec![1, 2, 3]);
    assert_abs_diff_eq!(metrics.precision[0], 0.75, epsilon = EPS);
    assert_abs_diff_eq!(metrics.precision[1], 1.0 / 3.0, epsilon = EPS);
    assert_abs_diff_eq!(metrics.precision[2], 1.0, epsilon = EPS);
}

#[test]
fn test_sklearn_parity_confusion_normalize_true() {
    // sklearn: confusion_matrix(..., normalize='true')
    // [[0.6, 0.4, 0. ],
    //  [0.5, 0.5, 0. ],
    //  [0. , 0. , 1. ]]
    let y_true = vec![1, 1, 1, 1, 1, 2, 2, 3];
    let y_pred = vec![1, 1, 1, 2, 2, 2, 1, 3];

    let norm = confusion_matrix(&y_pred, &y_true).unwrap().normalized();
    let expected = [[0.6, 0.4, 0.0], [0.5, 0.5, 0.0], [0.0, 0.0, 1.0]];
    for (row, want) in norm.rows().iter().zip(expected.iter()) {
        for (&got, &want) in row.iter().zip(want.iter()) {
            assert_abs_diff_eq!(got, want, epsilon = EPS);
        }
    }
}

#[test]
fn test_sklearn_parity_label_only_predicted() {
    // Label 3 never occurs in y_true but is predicted once; sklearn keeps it
    // on the label axis with precision 0 and recall 0 (ill-defined).
    let y_true = vec![1, 1, 2];
    let y_pred = vec![1, 3, 2];

    let macro_ = precision_recall_fscore_support(&y_pred, &y_true, Average::Macro).unwrap();
    assert_abs_diff_eq!(macro_.precision, 0.6666666666666666, epsilon = EPS);
    assert_abs_diff_eq!(macro_.recall, 0.5, epsilon = EPS);
    assert_abs_diff_eq!(macro_.f1, 0.5555555555555556, epsilon = EPS);

    let norm = confusion_matrix(&y_pred, &y_true).unwrap().normalized();
    assert_eq!(norm.labels(), &[1, 2, 3]);
    assert_abs_diff_eq!(norm.row_sum(2), 0.0, epsilon = EPS);
}

#[test]
fn test_sklearn_parity_binary() {
    // Class 1: TP=2, FP=1, FN=2 -> P=0.6667, R=0.5,  F1=0.5714
    // Class 2: TP=3, FP=2, FN=1 -> P=0.6,    R=0.75, F1=0.6667
    let y_true = vec![1, 1, 2, 2, 1, 2, 1, 2];
    let y_pred = vec![1, 2, 2, 1, 1, 2, 2, 2];

    let macro_ = precision_recall_fscore_support(&y_pred, &y_true, Average::Macro).unwrap();
    assert_abs_diff_eq!(macro_.precision, 0.6333333333333333, epsilon = EPS);
    assert_abs_diff_eq!(macro_.recall, 0.625, epsilon = EPS);
    assert_abs_diff_eq!(macro_.f1, 0.6190476190476191, epsilon = EPS);
}
