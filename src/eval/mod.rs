//! Tagger evaluation
//!
//! Scores a sequence-labeling model on a held-out set.
//!
//! ## Architecture
//!
//! - `classification`: confusion matrix, per-class and averaged metrics
//! - `scores`: padding-aware accumulation, aggregated results, text report
//! - `evaluator`: the inference loop tying model, data and output together
//! - `heatmap`: PNG rendering of the normalized confusion matrix
//! - `tagger`, `batch`, `device`, `labels`: the model, data, device and
//!   label-name seams
//! - `predictions`: offline scoring of exported predictions
//!
//! ## Example
//!
//! ```ignore
//! use tagger_eval::eval::{Evaluator, JsonlBatches, LabelMap};
//!
//! let mut evaluator = Evaluator::new(my_tagger, JsonlBatches::new("test.jsonl"));
//! let idx2label = LabelMap::load("idx2label.yaml")?;
//! evaluator.check_performance(&idx2label)?;
//! ```

pub mod batch;
pub mod classification;
pub mod device;
pub mod evaluator;
pub mod heatmap;
pub mod labels;
pub mod predictions;
pub mod scores;
pub mod tagger;

pub use batch::{Batch, BatchSource, JsonlBatches};
pub use classification::{
    classification_report, confusion_matrix, precision_recall_fscore_support, Average,
    ConfusionMatrix, MultiClassMetrics, NormalizedConfusion, PrecisionRecallF1,
};
pub use device::{ComputeDevice, DeviceChoice};
pub use evaluator::{heatmap_file_name, Evaluator, EvaluatorConfig};
pub use heatmap::{ConfusionHeatmap, HeatmapConfig};
pub use labels::LabelMap;
pub use predictions::{read_predictions, PredictionRecord};
pub use scores::{ClassPrecision, PerformanceReport, ScoreAccumulator, Scores, PAD_LABEL};
pub use tagger::{argmax_last_axis, SequenceTagger};
