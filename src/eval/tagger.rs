//! The model seam: anything that maps token ids to per-class logits

use ndarray::{Array2, Array3, ArrayView1, Axis};

use super::device::ComputeDevice;
use crate::error::{Error, Result};

/// Inference-capable sequence-labeling model
pub trait SequenceTagger {
    /// Model name, used for the heatmap file name
    fn name(&self) -> &str;

    /// Switch off training-only behaviour (dropout and the like)
    fn set_inference_mode(&mut self) {}

    /// Move weights to `device` before the first forward pass
    fn to_device(&mut self, _device: ComputeDevice) -> Result<()> {
        Ok(())
    }

    /// Per-class logits, shaped `[batch, seq, n_classes]`
    fn forward(&self, inputs: &Array2<usize>, pos: &Array2<usize>) -> Result<Array3<f32>>;
}

impl<T: SequenceTagger + ?Sized> SequenceTagger for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_inference_mode(&mut self) {
        (**self).set_inference_mode();
    }

    fn to_device(&mut self, device: ComputeDevice) -> Result<()> {
        (**self).to_device(device)
    }

    fn forward(&self, inputs: &Array2<usize>, pos: &Array2<usize>) -> Result<Array3<f32>> {
        (**self).forward(inputs, pos)
    }
}

/// Index of the largest logit along the class axis
///
/// Ties resolve to the lowest class index. Errors when the logits do not
/// cover the `[batch, seq]` shape of the gold labels or have no classes.
pub fn argmax_last_axis(logits: &Array3<f32>, labels_dim: (usize, usize)) -> Result<Array2<usize>> {
    let (batch, seq, n_classes) = logits.dim();
    if (batch, seq) != labels_dim || n_classes == 0 {
        return Err(Error::ShapeMismatch {
            expected: vec![labels_dim.0, labels_dim.1, n_classes.max(1)],
            actual: logits.shape().to_vec(),
        });
    }
    Ok(logits.map_axis(Axis(2), argmax))
}

pub(crate) fn argmax(lane: ArrayView1<'_, f32>) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in lane.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_argmax_picks_largest_logit() {
        let logits = Array3::from_shape_vec(
            (1, 3, 3),
            vec![0.1, 0.7, 0.2, 2.0, -1.0, 0.0, -3.0, -2.0, -1.0],
        )
        .unwrap();
        let preds = argmax_last_axis(&logits, (1, 3)).unwrap();
        assert_eq!(preds, array![[1, 0, 2]]);
    }

    #[test]
    fn test_argmax_ties_go_to_first() {
        let logits = Array3::from_elem((2, 2, 4), 0.5_f32);
        let preds = argmax_last_axis(&logits, (2, 2)).unwrap();
        assert!(preds.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_argmax_shape_mismatch() {
        let logits = Array3::<f32>::zeros((2, 5, 3));
        let err = argmax_last_axis(&logits, (2, 4)).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));

        let empty = Array3::<f32>::zeros((2, 4, 0));
        assert!(argmax_last_axis(&empty, (2, 4)).is_err());
    }
}
