//! Confusion matrix for multi-class classification

use std::fmt;

use crate::error::{Error, Result};

/// Confusion matrix for multi-class classification
///
/// Rows and columns follow the label axis: the sorted union of every label
/// seen in either the predictions or the ground truth. Element `[i][j]`
/// counts samples with true label `labels[i]` predicted as `labels[j]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrix {
    /// The matrix data: matrix[true_index][predicted_index] = count
    matrix: Vec<Vec<usize>>,
    /// Label ids along both axes, ascending
    labels: Vec<usize>,
}

impl ConfusionMatrix {
    /// Create an empty matrix over the given labels (sorted and deduplicated)
    pub fn with_labels(mut labels: Vec<usize>) -> Self {
        labels.sort_unstable();
        labels.dedup();
        let n = labels.len();
        Self {
            matrix: vec![vec![0; n]; n],
            labels,
        }
    }

    /// Create from predictions and ground truth
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Result<Self> {
        if y_pred.len() != y_true.len() {
            return Err(Error::LengthMismatch {
                predictions: y_pred.len(),
                labels: y_true.len(),
            });
        }

        let labels: Vec<usize> = y_pred.iter().chain(y_true.iter()).copied().collect();
        let mut cm = Self::with_labels(labels);

        for (&pred, &true_label) in y_pred.iter().zip(y_true.iter()) {
            cm.record(true_label, pred);
        }

        Ok(cm)
    }

    /// Count one sample. Labels outside the axis are ignored.
    pub fn record(&mut self, true_label: usize, predicted_label: usize) {
        if let (Some(i), Some(j)) = (self.index_of(true_label), self.index_of(predicted_label)) {
            self.matrix[i][j] += 1;
        }
    }

    /// Get the raw matrix
    pub fn matrix(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Get the label ids along the axes
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Get number of classes
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Position of a label id on the axis
    pub fn index_of(&self, label: usize) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Get element at [true_index][predicted_index]
    pub fn get(&self, true_index: usize, predicted_index: usize) -> usize {
        self.matrix[true_index][predicted_index]
    }

    /// Count of samples with true label `true_label` predicted as `predicted_label`
    pub fn count(&self, true_label: usize, predicted_label: usize) -> usize {
        match (self.index_of(true_label), self.index_of(predicted_label)) {
            (Some(i), Some(j)) => self.matrix[i][j],
            _ => 0,
        }
    }

    /// True positives for the class at `index`
    pub fn true_positives(&self, index: usize) -> usize {
        self.matrix[index][index]
    }

    /// False positives for the class at `index` (predicted as class but wasn't)
    pub fn false_positives(&self, index: usize) -> usize {
        (0..self.n_classes())
            .filter(|&i| i != index)
            .map(|i| self.matrix[i][index])
            .sum()
    }

    /// False negatives for the class at `index` (was class but predicted differently)
    pub fn false_negatives(&self, index: usize) -> usize {
        (0..self.n_classes())
            .filter(|&j| j != index)
            .map(|j| self.matrix[index][j])
            .sum()
    }

    /// True negatives for the class at `index`
    pub fn true_negatives(&self, index: usize) -> usize {
        self.total()
            - self.true_positives(index)
            - self.false_positives(index)
            - self.false_negatives(index)
    }

    /// Support (total true instances) for the class at `index`
    pub fn support(&self, index: usize) -> usize {
        self.matrix[index].iter().sum()
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Calculate accuracy
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }

    /// Normalize over the true labels (each row divided by its support)
    ///
    /// Rows without any true instance stay all zeros.
    pub fn normalized(&self) -> NormalizedConfusion {
        let rows = self
            .matrix
            .iter()
            .map(|row| {
                let support: usize = row.iter().sum();
                if support == 0 {
                    vec![0.0; row.len()]
                } else {
                    row.iter().map(|&c| c as f64 / support as f64).collect()
                }
            })
            .collect();

        NormalizedConfusion {
            rows,
            labels: self.labels.clone(),
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;

        write!(f, "        ")?;
        for label in &self.labels {
            write!(f, "{:>7}", format!("P{label}"))?;
        }
        writeln!(f)?;

        for (label, row) in self.labels.iter().zip(&self.matrix) {
            write!(f, "{:>8}", format!("T{label}"))?;
            for count in row {
                write!(f, "{count:>7}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Row-normalized confusion matrix
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedConfusion {
    rows: Vec<Vec<f64>>,
    labels: Vec<usize>,
}

impl NormalizedConfusion {
    /// Fractions per row, `rows[i][j]` in `[0, 1]`
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Label ids along both axes
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, true_index: usize, predicted_index: usize) -> f64 {
        self.rows[true_index][predicted_index]
    }

    /// Sum of a row: 1.0 for classes with true instances, 0.0 otherwise
    pub fn row_sum(&self, true_index: usize) -> f64 {
        self.rows[true_index].iter().sum()
    }
}
