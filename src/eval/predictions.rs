//! Exported predictions, scored offline
//!
//! One JSON object per line, one sequence per object. Either hard
//! predictions or per-token logits may be given:
//!
//! ```json
//! {"labels": [3, 1, 0], "predictions": [3, 2, 1]}
//! {"labels": [2, 2], "logits": [[0.1, 0.2, 2.5], [0.0, 1.0, 0.3]]}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::ArrayView1;
use serde::Deserialize;

use super::scores::ScoreAccumulator;
use super::tagger::argmax;
use crate::error::{Error, Result};

/// One exported sequence
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionRecord {
    /// Gold label ids, padding included
    pub labels: Vec<usize>,
    /// Predicted label ids
    #[serde(default)]
    pub predictions: Option<Vec<usize>>,
    /// Per-token class logits
    #[serde(default)]
    pub logits: Option<Vec<Vec<f32>>>,
}

impl PredictionRecord {
    /// Predicted ids, taking the arg-max of logits when no hard predictions are given
    pub fn predicted_ids(&self) -> Result<Vec<usize>> {
        match (&self.predictions, &self.logits) {
            (Some(p), _) => Ok(p.clone()),
            (None, Some(logits)) => Ok(logits
                .iter()
                .map(|row| argmax(ArrayView1::from(row.as_slice())))
                .collect()),
            (None, None) => Err(Error::Serialization {
                message: "record has neither `predictions` nor `logits`".into(),
            }),
        }
    }
}

/// Feed every record of a predictions file into `acc`
///
/// Returns the number of sequences read.
pub fn read_predictions(path: impl AsRef<Path>, acc: &mut ScoreAccumulator) -> Result<usize> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| Error::io(format!("opening {}", path.display()), e))?;

    let mut sequences = 0;
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        if line.trim().is_empty() {
            continue;
        }

        let at = |e: Error| Error::Serialization {
            message: format!("{} line {}: {e}", path.display(), i + 1),
        };
        let record: PredictionRecord = serde_json::from_str(&line).map_err(|e| at(e.into()))?;
        let predicted = record.predicted_ids().map_err(at)?;
        acc.push(&predicted, &record.labels).map_err(at)?;
        sequences += 1;
    }

    tracing::debug!(sequences, positions = acc.len(), path = %path.display(), "read predictions");
    Ok(sequences)
}
