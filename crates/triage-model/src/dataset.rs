//! The fixed patient cohort the regression pipeline is trained on.
//!
//! The cohort mirrors the classic 442-patient diabetes-progression table:
//! ten normalized baseline measurements per patient and a continuous
//! one-year disease-progression score. It is synthesized once from a fixed
//! seed, so every process that calls [`load_cohort`] sees bit-identical
//! data. That determinism underpins the training guarantee that the same
//! seed and split fraction always reproduce the same fitted pipeline.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Feature columns, in training order.
pub const FEATURE_NAMES: [&str; 10] = [
    "age", "sex", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6",
];

/// Number of patients in the cohort.
pub const NUM_ROWS: usize = 442;

/// Number of features per patient.
pub const NUM_FEATURES: usize = 10;

// The cohort is synthesized from this seed. Changing it changes the data
// and invalidates every previously trained artifact set.
const COHORT_SEED: u64 = 0xD1AB_E7E5;

/// Column index of the two-valued `sex` feature.
const SEX_COLUMN: usize = 1;

/// The two encoded levels of the `sex` column.
const SEX_LEVELS: [f64; 2] = [0.050680, -0.044642];

/// Half-width of the uniform range for the continuous feature columns.
const FEATURE_SPREAD: f64 = 0.0825;

/// Linear signal underlying the progression score, one weight per column.
/// Body mass index, blood pressure, and the s5 serum measurement dominate.
const TARGET_WEIGHTS: [f64; NUM_FEATURES] = [
    20.0, -45.0, 600.0, 380.0, -110.0, 85.0, -320.0, 220.0, 560.0, 100.0,
];

/// Baseline progression score for an average patient.
const TARGET_INTERCEPT: f64 = 152.0;

/// Half-width of the uniform noise added to the progression score.
const TARGET_NOISE: f64 = 70.0;

/// Observed progression scores are clamped to this range.
const TARGET_MIN: f64 = 25.0;
const TARGET_MAX: f64 = 346.0;

/// A feature matrix with its progression targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    /// Row-per-patient feature matrix, columns in [`FEATURE_NAMES`] order.
    pub features: Array2<f64>,

    /// Disease-progression score for each row.
    pub targets: Array1<f64>,
}

impl Cohort {
    /// Number of patients.
    pub fn num_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Load the fixed training cohort.
///
/// Repeated calls, in this or any other process, return bit-identical data.
pub fn load_cohort() -> Cohort {
    let mut rng = StdRng::seed_from_u64(COHORT_SEED);
    let mut features = Array2::<f64>::zeros((NUM_ROWS, NUM_FEATURES));
    let mut targets = Array1::<f64>::zeros(NUM_ROWS);

    for row in 0..NUM_ROWS {
        let mut signal = TARGET_INTERCEPT;
        for col in 0..NUM_FEATURES {
            let value = if col == SEX_COLUMN {
                SEX_LEVELS[rng.gen_range(0..SEX_LEVELS.len())]
            } else {
                rng.gen_range(-FEATURE_SPREAD..FEATURE_SPREAD)
            };
            features[[row, col]] = value;
            signal += TARGET_WEIGHTS[col] * value;
        }
        let noise = rng.gen_range(-TARGET_NOISE..TARGET_NOISE);
        targets[row] = (signal + noise).clamp(TARGET_MIN, TARGET_MAX).round();
    }

    Cohort { features, targets }
}
