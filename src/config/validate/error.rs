//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Invalid model name: {0:?} (must not contain path separators)")]
    InvalidModelName(String),

    #[error("Predictions file does not exist: {0}")]
    PredictionsNotFound(String),

    #[error("Label map file does not exist: {0}")]
    LabelsNotFound(String),

    #[error("Invalid heatmap size: {width}x{height} (both must be > 0)")]
    InvalidHeatmapSize { width: u32, height: u32 },

    #[error("Invalid glyph scale: {0} (must be in 1..=8)")]
    InvalidGlyphScale(u32),
}
