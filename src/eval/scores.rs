//! Aggregated evaluation results and the text report built from them

use std::cmp::Ordering;
use std::fmt;

use ndarray::Array2;

use super::classification::{
    Average, ConfusionMatrix, MultiClassMetrics, NormalizedConfusion, PrecisionRecallF1,
};
use super::labels::LabelMap;
use crate::error::{Error, Result};

/// Label id marking padding positions
pub const PAD_LABEL: usize = 0;

/// Collects (prediction, gold) pairs, dropping padding positions
#[derive(Clone, Debug)]
pub struct ScoreAccumulator {
    ignore_label: usize,
    predictions: Vec<usize>,
    labels: Vec<usize>,
}

impl ScoreAccumulator {
    pub fn new(ignore_label: usize) -> Self {
        Self {
            ignore_label,
            predictions: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Add positionally paired predictions and gold labels
    pub fn push(&mut self, predictions: &[usize], labels: &[usize]) -> Result<()> {
        if predictions.len() != labels.len() {
            return Err(Error::LengthMismatch {
                predictions: predictions.len(),
                labels: labels.len(),
            });
        }
        self.extend(predictions.iter().copied().zip(labels.iter().copied()));
        Ok(())
    }

    /// Add a `[batch, seq]` pair, flattened row by row
    pub fn push_batch(&mut self, predictions: &Array2<usize>, labels: &Array2<usize>) -> Result<()> {
        if predictions.dim() != labels.dim() {
            return Err(Error::ShapeMismatch {
                expected: labels.shape().to_vec(),
                actual: predictions.shape().to_vec(),
            });
        }
        self.extend(predictions.iter().copied().zip(labels.iter().copied()));
        Ok(())
    }

    fn extend(&mut self, pairs: impl Iterator<Item = (usize, usize)>) {
        for (pred, label) in pairs {
            if label != self.ignore_label {
                self.predictions.push(pred);
                self.labels.push(label);
            }
        }
    }

    /// Number of scored positions so far
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn ignore_label(&self) -> usize {
        self.ignore_label
    }

    /// Collected (predictions, gold labels), padding already removed
    pub fn pairs(&self) -> (&[usize], &[usize]) {
        (&self.predictions, &self.labels)
    }

    /// Compute all metrics over the collected positions
    pub fn finish(&self) -> Result<Scores> {
        if self.is_empty() {
            return Err(Error::NoValidPositions {
                ignore_label: self.ignore_label,
            });
        }
        Scores::from_predictions(&self.predictions, &self.labels)
    }
}

/// Precision of one class
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassPrecision {
    pub label: usize,
    pub precision: f64,
}

/// Results of one evaluation run
#[derive(Clone, Debug)]
pub struct Scores {
    /// Pooled over every scored position
    pub micro: PrecisionRecallF1,
    /// Unweighted mean over classes
    pub macro_avg: PrecisionRecallF1,
    /// One entry per label on the confusion axis, ascending label id
    pub class_precision: Vec<ClassPrecision>,
    /// Confusion matrix normalized over true labels
    pub confusion: NormalizedConfusion,
    /// Raw counts behind `confusion`
    pub counts: ConfusionMatrix,
}

impl Scores {
    /// Score already-filtered predictions against gold labels
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Result<Self> {
        if y_true.is_empty() {
            return Err(Error::NoValidPositions {
                ignore_label: PAD_LABEL,
            });
        }
        let counts = ConfusionMatrix::from_predictions(y_pred, y_true)?;
        let metrics = MultiClassMetrics::from_confusion_matrix(&counts);

        let class_precision = metrics
            .labels
            .iter()
            .zip(&metrics.precision)
            .map(|(&label, &precision)| ClassPrecision { label, precision })
            .collect();

        Ok(Self {
            micro: metrics.averaged(Average::Micro),
            macro_avg: metrics.averaged(Average::Macro),
            class_precision,
            confusion: counts.normalized(),
            counts,
        })
    }

    /// Number of scored positions
    pub fn n_scored(&self) -> usize {
        self.counts.total()
    }

    /// Per-class precision sorted by descending precision, `ignore_label` left out
    ///
    /// Equal precisions keep ascending label order.
    pub fn ranked_precision(&self, ignore_label: usize) -> Vec<ClassPrecision> {
        let mut ranked: Vec<ClassPrecision> = self
            .class_precision
            .iter()
            .filter(|c| c.label != ignore_label)
            .copied()
            .collect();
        ranked.sort_by(|a, b| {
            b.precision
                .partial_cmp(&a.precision)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }
}

const RULE: &str = "==============================";

/// Printable performance summary
#[derive(Clone, Debug)]
pub struct PerformanceReport {
    pub macro_avg: PrecisionRecallF1,
    pub micro: PrecisionRecallF1,
    /// (label name, precision), best first
    pub per_class: Vec<(String, f64)>,
}

impl PerformanceReport {
    /// Resolve label names and order classes for printing
    pub fn new(scores: &Scores, idx2label: &LabelMap, ignore_label: usize) -> Result<Self> {
        let per_class = scores
            .ranked_precision(ignore_label)
            .into_iter()
            .map(|c| Ok((idx2label.name(c.label)?.to_string(), c.precision)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            macro_avg: scores.macro_avg,
            micro: scores.micro,
            per_class,
        })
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.macro_avg;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Macro Precision: {:.4}, Macro Recall: {:.4}, Macro F1 Score: {:.4}",
            m.precision, m.recall, m.f1
        )?;

        writeln!(f, "{RULE}")?;
        writeln!(f, "Per class Precision:")?;
        for (label, precision) in &self.per_class {
            writeln!(f, "{label}: {precision:?}")?;
        }

        let m = &self.micro;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Micro Precision: {:.4}, Micro Recall: {:.4}, Micro F1 Score: {:.4}",
            m.precision, m.recall, m.f1
        )?;
        writeln!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_accumulator_drops_padding() {
        let mut acc = ScoreAccumulator::new(PAD_LABEL);
        acc.push_batch(&array![[1, 2, 5], [3, 0, 0]], &array![[1, 2, 0], [3, 0, 0]])
            .unwrap();

        assert_eq!(acc.len(), 3);
        let scores = acc.finish().unwrap();
        assert_eq!(scores.n_scored(), 3);
        assert_abs_diff_eq!(scores.micro.precision, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulator_keeps_predicted_padding() {
        // The model predicting the padding id at a real token is a mistake
        let mut acc = ScoreAccumulator::new(PAD_LABEL);
        acc.push(&[0, 2], &[1, 2]).unwrap();
        let scores = acc.finish().unwrap();

        assert_eq!(scores.counts.labels(), &[0, 1, 2]);
        assert_abs_diff_eq!(scores.micro.recall, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulator_custom_ignore_label() {
        let mut acc = ScoreAccumulator::new(99);
        acc.push(&[0, 1, 2], &[0, 99, 2]).unwrap();
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.ignore_label(), 99);
    }

    #[test]
    fn test_accumulator_rejects_mismatch() {
        let mut acc = ScoreAccumulator::new(PAD_LABEL);
        assert!(acc.push(&[1, 2], &[1]).is_err());
        assert!(acc.push_batch(&array![[1, 2]], &array![[1], [2]]).is_err());
    }

    #[test]
    fn test_all_padding_is_an_error() {
        let mut acc = ScoreAccumulator::new(PAD_LABEL);
        acc.push(&[3, 4], &[0, 0]).unwrap();
        assert!(matches!(
            acc.finish(),
            Err(Error::NoValidPositions { ignore_label: 0 })
        ));
    }

    #[test]
    fn test_ranked_precision_descending_and_stable() {
        // precision: 1 -> 0.5, 2 -> 1.0, 3 -> 1.0
        let scores = Scores::from_predictions(&[1, 1, 2, 3], &[1, 2, 2, 3]).unwrap();
        let ranked: Vec<usize> = scores.ranked_precision(PAD_LABEL).iter().map(|c| c.label).collect();
        assert_eq!(ranked, vec![2, 3, 1]);
    }

    #[test]
    fn test_ranked_precision_skips_ignore_label() {
        let scores = Scores::from_predictions(&[0, 1], &[1, 1]).unwrap();
        let ranked = scores.ranked_precision(PAD_LABEL);
        assert!(ranked.iter().all(|c| c.label != 0));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_report_layout() {
        let scores = Scores::from_predictions(&[1, 1, 2, 3], &[1, 2, 2, 3]).unwrap();
        let names = LabelMap::from_iter([(1, "NOUN"), (2, "VERB"), (3, "ADJ")]);
        let report = PerformanceReport::new(&scores, &names, PAD_LABEL).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], RULE);
        assert!(lines[1].starts_with("Macro Precision: 0.8333, Macro Recall: 0.8333"));
        assert_eq!(lines[2], RULE);
        assert_eq!(lines[3], "Per class Precision:");
        assert_eq!(lines[4], "VERB: 1.0");
        assert_eq!(lines[5], "ADJ: 1.0");
        assert_eq!(lines[6], "NOUN: 0.5");
        assert_eq!(lines[7], RULE);
        assert_eq!(
            lines[8],
            "Micro Precision: 0.7500, Micro Recall: 0.7500, Micro F1 Score: 0.7500"
        );
        assert_eq!(lines[9], RULE);
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_report_unknown_label() {
        let scores = Scores::from_predictions(&[1, 2], &[1, 2]).unwrap();
        let names = LabelMap::from_iter([(1, "NOUN")]);
        assert!(matches!(
            PerformanceReport::new(&scores, &names, PAD_LABEL),
            Err(Error::UnknownLabel(2))
        ));
    }
}
