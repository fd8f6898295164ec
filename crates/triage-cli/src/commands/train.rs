//! Train Command Implementation
//!
//! Runs one seeded training job end to end and writes the artifact set the
//! serving process loads.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use triage_model::{train, ModelKind, TrainConfig};

/// Train the progression model and write its artifacts
///
/// Training is deterministic: the same seed, split fraction, and model kind
/// always produce byte-identical artifacts and the same held-out RMSE. The
/// metrics summary is printed to stdout as pretty JSON.
///
/// # Example
///
/// ```bash
/// triage train \
///     --output-dir artifacts \
///     --seed 42 \
///     --model ridge
/// ```
#[derive(Args, Debug, Clone)]
pub struct TrainCommand {
    /// Seed for the train/test shuffle
    #[arg(long, short = 's', default_value = "42", env = "TRIAGE_SEED")]
    pub seed: u64,

    /// Directory to write the trained artifacts into
    #[arg(long, short = 'o', default_value = "artifacts", env = "TRIAGE_MODEL_DIR")]
    pub output_dir: PathBuf,

    /// Fraction of rows held out for evaluation (exclusive 0..1)
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Regression model to fit
    #[arg(long, value_enum, default_value = "linear")]
    pub model: ModelKindArg,

    /// Version tag recorded alongside the artifacts
    #[arg(long, env = "TRIAGE_MODEL_VERSION")]
    pub version: Option<String>,
}

/// CLI-facing names for the supported regressors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelKindArg {
    /// Ordinary least squares
    Linear,
    /// L2-penalized least squares
    Ridge,
}

impl From<ModelKindArg> for ModelKind {
    fn from(arg: ModelKindArg) -> Self {
        match arg {
            ModelKindArg::Linear => ModelKind::Linear,
            ModelKindArg::Ridge => ModelKind::Ridge,
        }
    }
}

impl TrainCommand {
    /// Execute the train command
    pub async fn run(&self) -> Result<()> {
        info!("Starting training...");
        info!("Output directory: {:?}", self.output_dir);
        info!("Seed: {}, test size: {}", self.seed, self.test_size);

        let config = TrainConfig {
            seed: self.seed,
            output_dir: self.output_dir.clone(),
            test_size: self.test_size,
            model: self.model.into(),
            version: self.version.clone(),
        };

        let metrics = train(&config).context("Training failed")?;

        let summary =
            serde_json::to_string_pretty(&metrics).context("Failed to render metrics")?;
        println!("{summary}");

        info!("Training completed successfully");
        Ok(())
    }
}
