//! Per-feature standardization fitted on the training split.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Column-wise standardizer: `z = (x - mean) / scale`.
///
/// Means and scales are estimated from the matrix passed to [`fit`], which
/// during training is the training split only. That keeps held-out rows and
/// serving-time inputs from influencing the scaling statistics. Scale is the
/// population standard deviation; a zero-variance column keeps scale 1.0 so
/// standardizing it reduces to centering.
///
/// [`fit`]: Standardizer::fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardizer {
    /// Estimate per-column means and scales from `data`.
    pub fn fit(data: ArrayView2<'_, f64>) -> Self {
        let n = data.nrows() as f64;
        let mut means = Vec::with_capacity(data.ncols());
        let mut scales = Vec::with_capacity(data.ncols());

        for col in data.axis_iter(Axis(1)) {
            let mean = col.sum() / n;
            let var = col
                .iter()
                .map(|v| {
                    let d = v - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            let std = var.sqrt();
            means.push(mean);
            scales.push(if std == 0.0 { 1.0 } else { std });
        }

        Self { means, scales }
    }

    /// Standardize a feature matrix column by column.
    pub fn transform(&self, data: ArrayView2<'_, f64>) -> Array2<f64> {
        let mut out = data.to_owned();
        for (j, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
            let mean = self.means[j];
            let scale = self.scales[j];
            col.mapv_inplace(|v| (v - mean) / scale);
        }
        out
    }

    /// Standardize a single feature row.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(v, (mean, scale))| (v - mean) / scale)
            .collect()
    }

    /// Number of feature columns this standardizer was fitted on.
    pub fn num_features(&self) -> usize {
        self.means.len()
    }
}
