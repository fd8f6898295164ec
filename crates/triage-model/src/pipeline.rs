//! The two-stage scoring pipeline: standardize, then regress.

use crate::error::ModelResult;
use crate::regression::{LinearModel, ModelKind};
use crate::scaler::Standardizer;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// A fitted standardize-then-regress pipeline.
///
/// The scaler and the regressor are fitted together on the same training
/// split and serialized together, so a loaded pipeline always scales inputs
/// with the statistics its weights were fitted against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    scaler: Standardizer,
    model: LinearModel,
}

impl Pipeline {
    /// Fit the scaler on `features`, then the regressor on the scaled output.
    pub fn fit(
        kind: ModelKind,
        features: ArrayView2<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> ModelResult<Self> {
        let scaler = Standardizer::fit(features);
        let scaled = scaler.transform(features);
        let model = LinearModel::fit(kind, scaled.view(), targets)?;
        Ok(Self { scaler, model })
    }

    /// Score one feature row, ordered as at fit time.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.model.predict_row(&self.scaler.transform_row(row))
    }

    /// Score every row of a feature matrix.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        let scaled = self.scaler.transform(features);
        self.model.predict(scaled.view())
    }

    /// Regressor family this pipeline was fitted with.
    pub fn kind(&self) -> ModelKind {
        self.model.kind()
    }

    /// Number of features the pipeline expects per row.
    pub fn num_features(&self) -> usize {
        self.scaler.num_features()
    }
}
