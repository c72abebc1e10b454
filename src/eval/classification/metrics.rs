//! Multi-class classification metrics

use super::average::Average;
use super::confusion::ConfusionMatrix;
use crate::error::Result;

/// Precision, recall, F1 and support for one class or one averaging strategy
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrecisionRecallF1 {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of scored samples (true instances for a single class)
    pub support: usize,
}

/// Multi-class classification metrics
///
/// All per-class vectors follow the confusion-matrix label axis.
#[derive(Clone, Debug)]
pub struct MultiClassMetrics {
    /// Label ids, ascending
    pub labels: Vec<usize>,
    /// Per-class precision
    pub precision: Vec<f64>,
    /// Per-class recall
    pub recall: Vec<f64>,
    /// Per-class F1 score
    pub f1: Vec<f64>,
    /// Per-class support (count)
    pub support: Vec<usize>,
    tp: Vec<usize>,
    fp: Vec<usize>,
    fn_: Vec<usize>,
}

impl MultiClassMetrics {
    /// Compute metrics from confusion matrix
    ///
    /// Ratios with a zero denominator are 0.0 and logged as ill-defined.
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let n_classes = cm.n_classes();
        let mut metrics = Self {
            labels: cm.labels().to_vec(),
            precision: Vec::with_capacity(n_classes),
            recall: Vec::with_capacity(n_classes),
            f1: Vec::with_capacity(n_classes),
            support: Vec::with_capacity(n_classes),
            tp: Vec::with_capacity(n_classes),
            fp: Vec::with_capacity(n_classes),
            fn_: Vec::with_capacity(n_classes),
        };

        let mut no_predicted = Vec::new();
        let mut no_true = Vec::new();

        for (class, &label) in cm.labels().iter().enumerate() {
            let tp = cm.true_positives(class);
            let fp = cm.false_positives(class);
            let fn_ = cm.false_negatives(class);

            if tp + fp == 0 {
                no_predicted.push(label);
            }
            if tp + fn_ == 0 {
                no_true.push(label);
            }

            let (p, r, f) = prf(tp, fp, fn_);
            metrics.precision.push(p);
            metrics.recall.push(r);
            metrics.f1.push(f);
            metrics.support.push(cm.support(class));
            metrics.tp.push(tp);
            metrics.fp.push(fp);
            metrics.fn_.push(fn_);
        }

        if !no_predicted.is_empty() {
            tracing::warn!(
                labels = ?no_predicted,
                "precision is ill-defined and set to 0.0 for labels with no predicted samples"
            );
        }
        if !no_true.is_empty() {
            tracing::warn!(
                labels = ?no_true,
                "recall is ill-defined and set to 0.0 for labels with no true samples"
            );
        }

        metrics
    }

    /// Compute from predictions and ground truth
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Result<Self> {
        let cm = ConfusionMatrix::from_predictions(y_pred, y_true)?;
        Ok(Self::from_confusion_matrix(&cm))
    }

    /// Number of classes on the label axis
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Total number of scored samples
    pub fn total_support(&self) -> usize {
        self.support.iter().sum()
    }

    /// Get averaged precision
    pub fn precision_avg(&self, average: Average) -> f64 {
        self.averaged(average).precision
    }

    /// Get averaged recall
    pub fn recall_avg(&self, average: Average) -> f64 {
        self.averaged(average).recall
    }

    /// Get averaged F1
    pub fn f1_avg(&self, average: Average) -> f64 {
        self.averaged(average).f1
    }

    /// Precision, recall and F1 under the given averaging strategy
    ///
    /// Support is the total number of scored samples.
    pub fn averaged(&self, average: Average) -> PrecisionRecallF1 {
        let support = self.total_support();
        match average {
            Average::Micro => {
                let tp = self.tp.iter().sum();
                let fp = self.fp.iter().sum();
                let fn_ = self.fn_.iter().sum();
                let (precision, recall, f1) = prf(tp, fp, fn_);
                PrecisionRecallF1 {
                    precision,
                    recall,
                    f1,
                    support,
                }
            }
            Average::Macro => PrecisionRecallF1 {
                precision: mean(&self.precision),
                recall: mean(&self.recall),
                f1: mean(&self.f1),
                support,
            },
            Average::Weighted => PrecisionRecallF1 {
                precision: self.weighted(&self.precision),
                recall: self.weighted(&self.recall),
                f1: self.weighted(&self.f1),
                support,
            },
        }
    }

    /// Per-class scores for the class with label id `label`
    pub fn class(&self, label: usize) -> Option<PrecisionRecallF1> {
        let i = self.labels.binary_search(&label).ok()?;
        Some(PrecisionRecallF1 {
            precision: self.precision[i],
            recall: self.recall[i],
            f1: self.f1[i],
            support: self.support[i],
        })
    }

    fn weighted(&self, values: &[f64]) -> f64 {
        let total_support = self.total_support();
        if total_support == 0 {
            return 0.0;
        }
        values
            .iter()
            .zip(&self.support)
            .map(|(&v, &s)| v * s as f64)
            .sum::<f64>()
            / total_support as f64
    }
}

fn prf(tp: usize, fp: usize, fn_: usize) -> (f64, f64, f64) {
    let tp = tp as f64;
    let p = if tp + fp as f64 > 0.0 {
        tp / (tp + fp as f64)
    } else {
        0.0
    };
    let r = if tp + fn_ as f64 > 0.0 {
        tp / (tp + fn_ as f64)
    } else {
        0.0
    };
    let f = if p + r > 0.0 {
        2.0 * p * r / (p + r)
    } else {
        0.0
    };
    (p, r, f)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Precision, recall, F1 and support in one call, sklearn style
///
/// # Example
/// ```
/// use tagger_eval::eval::{precision_recall_fscore_support, Average};
///
/// let y_pred = vec![1, 2, 2, 3];
/// let y_true = vec![1, 2, 3, 3];
/// let micro = precision_recall_fscore_support(&y_pred, &y_true, Average::Micro)?;
/// assert!((micro.precision - 0.75).abs() < 1e-12);
/// # Ok::<(), tagger_eval::Error>(())
/// ```
pub fn precision_recall_fscore_support(
    y_pred: &[usize],
    y_true: &[usize],
    average: Average,
) -> Result<PrecisionRecallF1> {
    Ok(MultiClassMetrics::from_predictions(y_pred, y_true)?.averaged(average))
}
