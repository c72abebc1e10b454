//! Error types with actionable diagnostics.
//!
//! Every fallible operation in the crate returns [`Result`]. Nothing here is
//! recovered from internally: errors surface to the caller, and the binary
//! prints them and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evaluating a tagger.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be read or parsed.
    #[error("Invalid configuration in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    Config { path: PathBuf, message: String },

    /// Configuration parsed but holds invalid values.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Model output does not line up with the gold labels.
    #[error("Tensor shape mismatch: expected {expected:?}, got {actual:?}\n  → Check that the model emits one logit row per input token")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Prediction and label sequences have different lengths.
    #[error("Length mismatch: {predictions} predictions vs {labels} labels")]
    LengthMismatch { predictions: usize, labels: usize },

    /// Every position in the dataset carried the ignore label.
    #[error("No valid positions to score (all gold labels equal ignore label {ignore_label})\n  → Check the dataset padding and the configured ignore_label")]
    NoValidPositions { ignore_label: usize },

    /// A label id has no entry in the index-to-label mapping.
    #[error("Label id {0} has no name in the label map\n  → Add it to the idx2label file")]
    UnknownLabel(usize),

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Heatmap encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The model failed during a forward pass.
    #[error("Inference failed on batch {batch}: {message}")]
    Inference { batch: usize, message: String },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if this error is caused by user input rather than a bug.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::Validation(_)
                | Self::NoValidPositions { .. }
                | Self::UnknownLabel(_)
                | Self::Serialization { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Validation(_) => "E003",
            Self::ShapeMismatch { .. } => "E040",
            Self::LengthMismatch { .. } => "E041",
            Self::NoValidPositions { .. } => "E042",
            Self::UnknownLabel(_) => "E043",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
            Self::Image(_) => "E052",
            Self::Inference { .. } => "E060",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            Error::Config {
                path: "".into(),
                message: "".into(),
            },
            Error::Validation(ValidationError::EmptyModelName),
            Error::ShapeMismatch {
                expected: vec![],
                actual: vec![],
            },
            Error::LengthMismatch {
                predictions: 0,
                labels: 1,
            },
            Error::NoValidPositions { ignore_label: 0 },
            Error::UnknownLabel(3),
            Error::io("x", std::io::Error::other("boom")),
            Error::Serialization {
                message: "".into(),
            },
            Error::Inference {
                batch: 0,
                message: "".into(),
            },
        ];

        let codes: Vec<_> = errors.iter().map(Error::code).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|c| c.starts_with('E')));
    }

    #[test]
    fn test_user_errors() {
        assert!(Error::UnknownLabel(7).is_user_error());
        assert!(Error::NoValidPositions { ignore_label: 0 }.is_user_error());
        assert!(!Error::ShapeMismatch {
            expected: vec![2, 3],
            actual: vec![2, 4]
        }
        .is_user_error());
    }

    #[test]
    fn test_io_error_constructor() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("reading predictions", io_err);

        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("reading predictions"));
    }

    #[test]
    fn test_messages_name_the_offending_values() {
        let msg = Error::UnknownLabel(42).to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("idx2label"));

        let msg = Error::NoValidPositions { ignore_label: 0 }.to_string();
        assert!(msg.contains("ignore_label"));
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let err: Error = serde_json::from_str::<Vec<usize>>("[1,").unwrap_err().into();
        assert_eq!(err.code(), "E051");
    }
}
