//! Evaluation metrics and the persisted training summary.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Root mean squared error between predictions and targets.
///
/// Both views must have the same non-zero length.
pub fn rmse(predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(predictions.len(), targets.len());
    let n = predictions.len() as f64;
    let sum_sq = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| {
            let d = p - t;
            d * d
        })
        .sum::<f64>();
    (sum_sq / n).sqrt()
}

/// Summary of one training run, persisted as `metrics.json`.
///
/// The field names are part of the artifact contract; downstream tooling
/// parses them from disk and from the trainer's stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Regressor family, `"linear"` or `"ridge"`.
    pub model: String,
    /// Shuffle seed the split was drawn with.
    pub seed: u64,
    /// Held-out fraction that was requested.
    pub test_size: f64,
    /// Root mean squared error on the held-out split.
    pub rmse: f64,
    /// Number of training rows.
    pub n_train: usize,
    /// Number of held-out rows.
    pub n_test: usize,
}
