//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::EvalSpec;

/// Validate an evaluation config
///
/// Checks:
/// - The model name can be used as a file name stem
/// - Input files exist
/// - Heatmap settings are in range
pub fn validate_config(spec: &EvalSpec) -> Result<(), ValidationError> {
    if spec.model_name.trim().is_empty() {
        return Err(ValidationError::EmptyModelName);
    }
    if spec.model_name.contains(['/', '\\']) {
        return Err(ValidationError::InvalidModelName(spec.model_name.clone()));
    }

    if !spec.predictions.exists() {
        return Err(ValidationError::PredictionsNotFound(
            spec.predictions.display().to_string(),
        ));
    }
    if !spec.labels.exists() {
        return Err(ValidationError::LabelsNotFound(
            spec.labels.display().to_string(),
        ));
    }

    let heatmap = &spec.evaluator.heatmap;
    if heatmap.width == 0 || heatmap.height == 0 {
        return Err(ValidationError::InvalidHeatmapSize {
            width: heatmap.width,
            height: heatmap.height,
        });
    }
    if !(1..=8).contains(&heatmap.glyph_scale) {
        return Err(ValidationError::InvalidGlyphScale(heatmap.glyph_scale));
    }

    Ok(())
}
