//! Lazily-initialized scoring state.
//!
//! The deserialized pipeline and its feature manifest live in a
//! [`tokio::sync::OnceCell`]: the first request that needs the model
//! triggers the load, concurrent first requests wait on that single load,
//! and a failed load is not cached, so the next request retries. The
//! process keeps serving liveness probes throughout.

use crate::error::{ServingError, ServingResult};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use triage_model::artifacts;
use triage_model::Pipeline;

/// A deserialized pipeline plus the feature order it expects.
#[derive(Debug)]
pub struct LoadedScorer {
    pipeline: Pipeline,
    feature_names: Vec<String>,
}

impl LoadedScorer {
    /// Feature order the pipeline was fitted on.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Score one row ordered per [`feature_names`](Self::feature_names).
    pub fn predict(&self, row: &[f64]) -> ServingResult<f64> {
        if row.len() != self.pipeline.num_features() {
            return Err(ServingError::prediction(format!(
                "pipeline expects {} features, manifest provided {}",
                self.pipeline.num_features(),
                row.len()
            )));
        }
        Ok(self.pipeline.predict_row(row))
    }
}

/// Handle owning the lazy scorer cache and the startup-read version tag.
///
/// Cloning the handle shares the underlying cache, so every connection task
/// observes the same load-once behavior.
#[derive(Debug, Clone)]
pub struct ScorerHandle {
    model_dir: PathBuf,
    model_version: String,
    cell: Arc<OnceCell<Arc<LoadedScorer>>>,
}

impl ScorerHandle {
    /// Create a handle for `model_dir`, reading the version tag once.
    ///
    /// The tag is fixed for the life of the process: a `MODEL_VERSION` file
    /// written after startup is not picked up until restart.
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        let model_dir = model_dir.into();
        let model_version = artifacts::read_model_version(&model_dir)
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            model_dir,
            model_version,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Version tag read at startup, `"unknown"` when absent.
    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Whether the pipeline is already in memory.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the scorer, loading artifacts on first use.
    ///
    /// Concurrent callers share one in-flight load; a failure is returned
    /// to the caller that observed it and the cell stays empty for the next
    /// attempt.
    pub async fn get(&self) -> ServingResult<Arc<LoadedScorer>> {
        let scorer = self
            .cell
            .get_or_try_init(|| async { self.load() })
            .await?;
        Ok(Arc::clone(scorer))
    }

    fn load(&self) -> ServingResult<Arc<LoadedScorer>> {
        info!(dir = %self.model_dir.display(), "Loading model artifacts");
        let (pipeline, feature_names) =
            artifacts::load_artifacts(&self.model_dir).map_err(|e| {
                warn!(error = %e, "Model load failed");
                ServingError::from(e)
            })?;
        info!(
            features = feature_names.len(),
            kind = %pipeline.kind(),
            "Model ready"
        );
        Ok(Arc::new(LoadedScorer {
            pipeline,
            feature_names,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use triage_model::{train, TrainConfig};

    fn trained_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let config = TrainConfig {
            output_dir: dir.path().to_path_buf(),
            ..TrainConfig::default()
        };
        train(&config).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_from_trained_dir() {
        let dir = trained_dir();
        let handle = ScorerHandle::new(dir.path());
        assert!(!handle.is_loaded());

        let scorer = handle.get().await.unwrap();
        assert!(handle.is_loaded());
        assert_eq!(scorer.feature_names().len(), 10);
    }

    #[tokio::test]
    async fn test_missing_artifacts_reported_and_retried() {
        let dir = tempdir().unwrap();
        let handle = ScorerHandle::new(dir.path());

        let result = handle.get().await;
        assert!(matches!(result, Err(ServingError::ArtifactsMissing)));
        assert!(!handle.is_loaded());

        // Artifacts appear later; the next request succeeds.
        let config = TrainConfig {
            output_dir: dir.path().to_path_buf(),
            ..TrainConfig::default()
        };
        train(&config).unwrap();
        assert!(handle.get().await.is_ok());
        assert!(handle.is_loaded());
    }

    #[tokio::test]
    async fn test_corrupt_pipeline_reports_load_failure() {
        let dir = trained_dir();
        std::fs::write(dir.path().join(artifacts::PIPELINE_FILE), b"garbage").unwrap();

        let handle = ScorerHandle::new(dir.path());
        match handle.get().await {
            Err(ServingError::ModelLoad(reason)) => {
                assert!(reason.contains("decode"));
            }
            other => panic!("expected ModelLoad, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_version_read_once_at_startup() {
        let dir = trained_dir();
        let handle = ScorerHandle::new(dir.path());
        assert_eq!(handle.model_version(), "unknown");

        // A tag written after the handle exists is not observed.
        std::fs::write(dir.path().join(artifacts::MODEL_VERSION_FILE), "v9").unwrap();
        assert_eq!(handle.model_version(), "unknown");

        // A fresh process (handle) sees it.
        let fresh = ScorerHandle::new(dir.path());
        assert_eq!(fresh.model_version(), "v9");
    }

    #[tokio::test]
    async fn test_concurrent_first_use_loads_once() {
        let dir = trained_dir();
        let handle = ScorerHandle::new(dir.path());

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle.get().await.map(|s| s.feature_names().to_vec())
            }));
        }

        let mut first: Option<Vec<String>> = None;
        for task in tasks {
            let names = task.await.unwrap().unwrap();
            match &first {
                None => first = Some(names),
                Some(expected) => assert_eq!(&names, expected),
            }
        }
        assert!(handle.is_loaded());
    }

    #[tokio::test]
    async fn test_scorer_rejects_wrong_width_row() {
        let dir = trained_dir();
        let handle = ScorerHandle::new(dir.path());
        let scorer = handle.get().await.unwrap();

        let result = scorer.predict(&[1.0, 2.0]);
        assert!(matches!(result, Err(ServingError::Prediction(_))));
    }
}
