//! Least-squares regressors solved through the normal equations.

use crate::error::{ModelError, ModelResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// L2 penalty strength applied by [`ModelKind::Ridge`].
pub const RIDGE_LAMBDA: f64 = 1.0;

/// Regressor family selectable at training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Ordinary least squares.
    Linear,
    /// L2-penalized least squares.
    Ridge,
}

impl ModelKind {
    /// Penalty added to the diagonal of the Gram matrix.
    pub fn lambda(self) -> f64 {
        match self {
            ModelKind::Linear => 0.0,
            ModelKind::Ridge => RIDGE_LAMBDA,
        }
    }

    /// Stable lowercase name used in metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::Ridge => "ridge",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fitted linear predictor: `y = intercept + w · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    kind: ModelKind,
    intercept: f64,
    weights: Vec<f64>,
}

impl LinearModel {
    /// Fit the predictor on column-centered features.
    ///
    /// The intercept is the target mean and is never penalized; the weights
    /// solve `(XᵀX + λI) w = Xᵀ(y - ȳ)` by Cholesky factorization. Callers
    /// standardize the features first, which centers every column, so this
    /// is exact ordinary (or ridge) least squares with an intercept.
    pub fn fit(
        kind: ModelKind,
        features: ArrayView2<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> ModelResult<Self> {
        let n = features.nrows();
        let d = features.ncols();
        if n == 0 || targets.len() != n {
            return Err(ModelError::invalid_argument(format!(
                "feature rows ({n}) and targets ({}) must be non-empty and equal",
                targets.len()
            )));
        }

        let intercept = targets.sum() / n as f64;
        let centered = targets.mapv(|y| y - intercept);

        let mut gram: Array2<f64> = features.t().dot(&features);
        let lambda = kind.lambda();
        if lambda > 0.0 {
            for j in 0..d {
                gram[[j, j]] += lambda;
            }
        }
        let rhs: Array1<f64> = features.t().dot(&centered);

        let weights = solve_cholesky(&gram, &rhs)?;
        Ok(Self {
            kind,
            intercept,
            weights: weights.to_vec(),
        })
    }

    /// Score one feature row.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(row.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    /// Score every row of a feature matrix.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        let weights = Array1::from_vec(self.weights.clone());
        features.dot(&weights) + self.intercept
    }

    /// Regressor family this model was fitted as.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Fitted weights, one per feature column.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Solve `A x = b` for symmetric positive-definite `A`.
fn solve_cholesky(a: &Array2<f64>, b: &Array1<f64>) -> ModelResult<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }
            if i == j {
                if sum <= 0.0 {
                    return Err(ModelError::NotPositiveDefinite);
                }
                l[[i, j]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }

    // L y = b, then Lᵀ x = y.
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[[i, k]] * y[k];
        }
        y[i] = sum / l[[i, i]];
    }

    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for k in (i + 1)..n {
            sum -= l[[k, i]] * x[k];
        }
        x[i] = sum / l[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_model_kind_names() {
        assert_eq!(ModelKind::Linear.as_str(), "linear");
        assert_eq!(ModelKind::Ridge.to_string(), "ridge");
        assert_eq!(ModelKind::Linear.lambda(), 0.0);
        assert_eq!(ModelKind::Ridge.lambda(), RIDGE_LAMBDA);
    }

    #[test]
    fn test_solve_cholesky_known_system() {
        // A = [[4, 2], [2, 3]], b = [10, 8] has solution x = [1.75, 1.5].
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let b = array![10.0, 8.0];
        let x = solve_cholesky(&a, &b).unwrap();
        assert!((x[0] - 1.75).abs() < 1e-12);
        assert!((x[1] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_solve_cholesky_rejects_indefinite() {
        let a = array![[0.0, 0.0], [0.0, 0.0]];
        let b = array![1.0, 1.0];
        assert!(matches!(
            solve_cholesky(&a, &b),
            Err(ModelError::NotPositiveDefinite)
        ));
    }

    #[test]
    fn test_linear_fit_recovers_exact_relationship() {
        // y = 3 + 2*x0 - x1 on centered columns, no noise.
        let features = array![
            [-2.0, -1.0],
            [-1.0, 1.0],
            [0.0, -1.0],
            [1.0, 1.0],
            [2.0, 0.0]
        ];
        let targets = features.map_axis(ndarray::Axis(1), |row| 3.0 + 2.0 * row[0] - row[1]);

        let model = LinearModel::fit(ModelKind::Linear, features.view(), targets.view()).unwrap();
        assert!((model.intercept() - 3.0).abs() < 1e-10);
        assert!((model.weights()[0] - 2.0).abs() < 1e-10);
        assert!((model.weights()[1] + 1.0).abs() < 1e-10);

        let prediction = model.predict_row(&[1.0, 1.0]);
        assert!((prediction - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_predict_matrix_matches_predict_row() {
        let features = array![[-1.0, 0.5], [0.0, -0.5], [1.0, 0.0]];
        let targets = array![1.0, 2.0, 3.0];
        let model = LinearModel::fit(ModelKind::Linear, features.view(), targets.view()).unwrap();

        let batch = model.predict(features.view());
        for (i, row) in features.rows().into_iter().enumerate() {
            let single = model.predict_row(row.as_slice().unwrap());
            assert!((batch[i] - single).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ridge_shrinks_weights_toward_zero() {
        // Orthogonal centered columns, so each ridge weight is the OLS
        // weight scaled by s / (s + lambda).
        let features = array![[-1.5, 1.0], [-0.5, -1.0], [0.5, -1.0], [1.5, 1.0]];
        let targets = array![-3.0, -1.0, 2.0, 2.0];

        let ols = LinearModel::fit(ModelKind::Linear, features.view(), targets.view()).unwrap();
        let ridge = LinearModel::fit(ModelKind::Ridge, features.view(), targets.view()).unwrap();

        assert_eq!(ridge.kind(), ModelKind::Ridge);
        assert!((ols.weights()[0] - 1.8).abs() < 1e-12);
        assert!((ridge.weights()[0] - 1.5).abs() < 1e-12);
        for (w_ols, w_ridge) in ols.weights().iter().zip(ridge.weights()) {
            assert!(w_ridge.abs() < w_ols.abs());
        }
        // Intercept is unpenalized, so both models share the target mean.
        assert!((ols.intercept() - ridge.intercept()).abs() < 1e-12);
    }

    #[test]
    fn test_fit_rejects_empty_input() {
        let features = Array2::<f64>::zeros((0, 2));
        let targets = Array1::<f64>::zeros(0);
        let result = LinearModel::fit(ModelKind::Linear, features.view(), targets.view());
        assert!(matches!(result, Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn test_serde_round_trip() {
        let features = array![[-1.0, 1.0], [0.0, 0.0], [1.0, -1.0]];
        let targets = array![1.0, 2.0, 3.0];
        let model = LinearModel::fit(ModelKind::Ridge, features.view(), targets.view()).unwrap();

        let bytes = bincode::serialize(&model).unwrap();
        let decoded: LinearModel = bincode::deserialize(&bytes).unwrap();
        assert_eq!(model, decoded);
    }
}
