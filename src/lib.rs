//! tagger-eval: evaluation harness for sequence-labeling models
//!
//! Runs a tagger over a held-out set, drops padding positions, and reports
//! micro/macro precision-recall-F1, per-class precision and a row-normalized
//! confusion matrix rendered as a PNG heatmap.

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;

pub use error::{Error, Result};
