//! YAML schema for evaluation runs

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::eval::EvaluatorConfig;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
pub(crate) fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Complete evaluation config
///
/// ```yaml
/// model_name: bilstm_pos
/// predictions: data/test_predictions.jsonl
/// labels: data/idx2label.yaml
/// output_dir: model
/// ignore_label: 0
/// device: auto
/// heatmap:
///   width: 1000
///   height: 700
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSpec {
    /// Model name, used for the heatmap file name
    pub model_name: String,
    /// Exported predictions (JSONL, one sequence per line)
    pub predictions: PathBuf,
    /// Index-to-label-name mapping (YAML or JSON)
    pub labels: PathBuf,
    /// Evaluator settings
    #[serde(flatten)]
    pub evaluator: EvaluatorConfig,
}
