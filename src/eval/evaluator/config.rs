//! Evaluation configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::super::device::DeviceChoice;
use super::super::heatmap::HeatmapConfig;
use super::super::scores::PAD_LABEL;

/// Configuration for a tagger evaluation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Gold label marking positions that are not scored
    pub ignore_label: usize,
    /// Heatmap directory, relative to the working directory unless absolute
    pub output_dir: PathBuf,
    /// Inference device
    pub device: DeviceChoice,
    /// Show a progress bar while predicting
    #[serde(deserialize_with = "crate::config::deserialize_bool_lenient")]
    pub progress: bool,
    /// Heatmap rendering
    pub heatmap: HeatmapConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            ignore_label: PAD_LABEL,
            output_dir: PathBuf::from("model"),
            device: DeviceChoice::Auto,
            progress: true,
            heatmap: HeatmapConfig::default(),
        }
    }
}
