//! Evaluation batches and the sources that produce them

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::Deserialize;

use crate::error::{Error, Result};

/// One batch of the held-out set
///
/// All three arrays are `[batch, seq]`; `outputs` holds gold label ids with
/// padding positions set to the ignore label.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    /// Token ids
    pub inputs: Array2<usize>,
    /// Gold label ids
    pub outputs: Array2<usize>,
    /// Positional / part-of-speech feature ids
    pub pos: Array2<usize>,
}

impl Batch {
    /// Build a batch, checking that the three arrays share one shape
    pub fn new(inputs: Array2<usize>, outputs: Array2<usize>, pos: Array2<usize>) -> Result<Self> {
        for other in [&outputs, &pos] {
            if other.dim() != inputs.dim() {
                return Err(Error::ShapeMismatch {
                    expected: inputs.shape().to_vec(),
                    actual: other.shape().to_vec(),
                });
            }
        }
        Ok(Self {
            inputs,
            outputs,
            pos,
        })
    }

    /// Build a batch from nested rows (one row per sequence)
    pub fn from_rows(
        inputs: Vec<Vec<usize>>,
        outputs: Vec<Vec<usize>>,
        pos: Vec<Vec<usize>>,
    ) -> Result<Self> {
        Self::new(rows_to_array(inputs)?, rows_to_array(outputs)?, rows_to_array(pos)?)
    }

    /// Number of sequences
    pub fn batch_size(&self) -> usize {
        self.outputs.nrows()
    }

    /// Padded sequence length
    pub fn seq_len(&self) -> usize {
        self.outputs.ncols()
    }
}

fn rows_to_array(rows: Vec<Vec<usize>>) -> Result<Array2<usize>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
        return Err(Error::ShapeMismatch {
            expected: vec![n_cols],
            actual: vec![bad.len()],
        });
    }
    let flat: Vec<usize> = rows.into_iter().flatten().collect();
    let n_items = flat.len();
    Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| Error::ShapeMismatch {
        expected: vec![n_rows, n_cols],
        actual: vec![n_items],
    })
}

/// Sequential producer of evaluation batches
pub trait BatchSource {
    /// Iterate all batches once, in order
    fn batches(&self) -> Box<dyn Iterator<Item = Result<Batch>> + '_>;

    /// Number of batches, when known up front
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

impl BatchSource for [Batch] {
    fn batches(&self) -> Box<dyn Iterator<Item = Result<Batch>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl BatchSource for Vec<Batch> {
    fn batches(&self) -> Box<dyn Iterator<Item = Result<Batch>> + '_> {
        self.as_slice().batches()
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

#[derive(Deserialize)]
struct RawBatch {
    inputs: Vec<Vec<usize>>,
    outputs: Vec<Vec<usize>>,
    pos: Vec<Vec<usize>>,
}

/// File-backed batches, one JSON object per line:
///
/// ```json
/// {"inputs": [[12, 7, 0]], "outputs": [[3, 1, 0]], "pos": [[2, 5, 0]]}
/// ```
///
/// The file is re-read on every pass; blank lines are skipped.
#[derive(Clone, Debug)]
pub struct JsonlBatches {
    path: PathBuf,
}

impl JsonlBatches {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BatchSource for JsonlBatches {
    fn batches(&self) -> Box<dyn Iterator<Item = Result<Batch>> + '_> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                let err = Error::io(format!("opening {}", self.path.display()), e);
                return Box::new(std::iter::once(Err(err)));
            }
        };

        let path = self.path.clone();
        let lines = BufReader::new(file).lines().enumerate().filter_map(move |(i, line)| {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    return Some(Err(Error::io(
                        format!("reading {} line {}", path.display(), i + 1),
                        e,
                    )))
                }
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(parse_batch_line(&line).map_err(|e| Error::Serialization {
                message: format!("{} line {}: {e}", path.display(), i + 1),
            }))
        });

        Box::new(lines)
    }
}

fn parse_batch_line(line: &str) -> Result<Batch> {
    let raw: RawBatch = serde_json::from_str(line)?;
    Batch::from_rows(raw.inputs, raw.outputs, raw.pos)
}
