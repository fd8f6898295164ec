//! Training and artifact plumbing for the diabetes-progression scorer.
//!
//! This crate owns everything that happens before a prediction is served:
//! the fixed patient cohort, the seeded train/test split, the
//! standardize-then-regress pipeline, the held-out RMSE evaluation, and the
//! artifact directory both the trainer and the serving process agree on.
//!
//! # Overview
//!
//! A training run is one call to [`train`]:
//!
//! ```no_run
//! use triage_model::{train, TrainConfig};
//!
//! # fn main() -> Result<(), triage_model::ModelError> {
//! let metrics = train(&TrainConfig::default())?;
//! println!("held-out rmse: {:.3}", metrics.rmse);
//! # Ok(())
//! # }
//! ```
//!
//! The pieces compose the same way by hand:
//!
//! ```
//! use triage_model::{load_cohort, ModelKind, Pipeline};
//!
//! # fn main() -> Result<(), triage_model::ModelError> {
//! let cohort = load_cohort();
//! let pipeline = Pipeline::fit(
//!     ModelKind::Linear,
//!     cohort.features.view(),
//!     cohort.targets.view(),
//! )?;
//! let score = pipeline.predict_row(&cohort.features.row(0).to_vec());
//! assert!(score.is_finite());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`dataset`] - The fixed 442-patient cohort and its column names
//! - [`split`] - Seeded shuffling into train and held-out rows
//! - [`scaler`] - Per-feature standardization
//! - [`regression`] - Linear and ridge regressors
//! - [`pipeline`] - The fitted scaler + regressor pair
//! - [`metrics`] - RMSE and the persisted training summary
//! - [`artifacts`] - The on-disk artifact layout
//! - [`trainer`] - The end-to-end training entry point
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifacts;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod regression;
pub mod scaler;
pub mod split;
pub mod trainer;

// Re-export main types for convenience
pub use dataset::{load_cohort, Cohort, FEATURE_NAMES, NUM_FEATURES, NUM_ROWS};
pub use error::{ModelError, ModelResult};
pub use metrics::{rmse, TrainingMetrics};
pub use pipeline::Pipeline;
pub use regression::{LinearModel, ModelKind, RIDGE_LAMBDA};
pub use scaler::Standardizer;
pub use split::{split_rows, SplitIndices};
pub use trainer::{train, TrainConfig};
