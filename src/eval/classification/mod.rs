//! Classification metrics for tagger evaluation
//!
//! Provides multi-class classification metrics including:
//! - Confusion matrix computation and row normalization
//! - Per-class precision, recall, F1
//! - Macro, micro, and weighted averaging
//! - sklearn-style classification reports

mod average;
mod confusion;
mod metrics;
mod report;

#[cfg(test)]
mod sklearn_parity_tests;

pub use average::Average;
pub use confusion::{ConfusionMatrix, NormalizedConfusion};
pub use metrics::{precision_recall_fscore_support, MultiClassMetrics, PrecisionRecallF1};
pub use report::{classification_report, confusion_matrix};
