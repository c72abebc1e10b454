//! Tagger evaluator
//!
//! Runs a sequence tagger over a held-out set, scores its predictions and
//! produces the text report and confusion-matrix heatmap.

mod config;
mod tagger_evaluator;


pub use config::EvaluatorConfig;
pub use tagger_evaluator::{heatmap_file_name, Evaluator};
