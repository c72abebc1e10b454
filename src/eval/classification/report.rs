//! Classification report functions

use super::average::Average;
use super::confusion::ConfusionMatrix;
use super::metrics::MultiClassMetrics;
use crate::error::Result;
use crate::eval::labels::LabelMap;

/// Compute confusion matrix from predictions and ground truth
///
/// # Example
/// ```
/// use tagger_eval::eval::confusion_matrix;
///
/// let y_pred = vec![1, 2, 2, 3, 1];
/// let y_true = vec![1, 2, 1, 3, 2];
/// let cm = confusion_matrix(&y_pred, &y_true)?;
///
/// assert_eq!(cm.count(1, 1), 1); // True 1, predicted 1
/// assert_eq!(cm.count(1, 2), 1); // True 1, predicted 2
/// # Ok::<(), tagger_eval::Error>(())
/// ```
pub fn confusion_matrix(y_pred: &[usize], y_true: &[usize]) -> Result<ConfusionMatrix> {
    ConfusionMatrix::from_predictions(y_pred, y_true)
}

/// Generate sklearn-style classification report
///
/// Rows are named through `names` when given; labels missing from the map
/// fall back to `Class <id>`.
pub fn classification_report(
    y_pred: &[usize],
    y_true: &[usize],
    names: Option<&LabelMap>,
) -> Result<String> {
    let cm = ConfusionMatrix::from_predictions(y_pred, y_true)?;
    let metrics = MultiClassMetrics::from_confusion_matrix(&cm);

    let mut report = String::new();

    report.push_str(&format!(
        "{:>14} {:>10} {:>10} {:>10} {:>10}\n",
        "", "precision", "recall", "f1-score", "support"
    ));
    report.push_str(&"-".repeat(58));
    report.push('\n');

    for (i, &label) in metrics.labels.iter().enumerate() {
        let name = names
            .and_then(|m| m.get(label))
            .map_or_else(|| format!("Class {label}"), str::to_string);
        report.push_str(&format!(
            "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            name, metrics.precision[i], metrics.recall[i], metrics.f1[i], metrics.support[i]
        ));
    }

    report.push_str(&"-".repeat(58));
    report.push('\n');

    for (name, average) in [
        ("micro avg", Average::Micro),
        ("macro avg", Average::Macro),
        ("weighted avg", Average::Weighted),
    ] {
        let scores = metrics.averaged(average);
        report.push_str(&format!(
            "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            name, scores.precision, scores.recall, scores.f1, scores.support
        ));
    }

    report.push_str(&format!("\nAccuracy: {:.4}\n", cm.accuracy()));

    Ok(report)
}
