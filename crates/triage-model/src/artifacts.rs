//! The on-disk artifact layout shared by training and serving.
//!
//! A training run owns the artifact directory and overwrites it wholesale;
//! serving processes treat the directory as read-only. Both sides go through
//! this module so the file names and encodings are defined exactly once.

use crate::error::{ModelError, ModelResult};
use crate::metrics::TrainingMetrics;
use crate::pipeline::Pipeline;
use std::fs;
use std::path::Path;
use tracing::info;

/// Serialized pipeline blob.
pub const PIPELINE_FILE: &str = "pipeline.bin";

/// Ordered feature-name manifest.
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Training run summary.
pub const METRICS_FILE: &str = "metrics.json";

/// Optional opaque version tag.
pub const MODEL_VERSION_FILE: &str = "MODEL_VERSION";

/// Write a complete artifact set into `dir`, creating it if needed.
///
/// `MODEL_VERSION` is written only when a version tag is supplied. Existing
/// files are overwritten in place; there is no staging or rollback.
pub fn save_artifacts(
    dir: &Path,
    pipeline: &Pipeline,
    feature_names: &[String],
    metrics: &TrainingMetrics,
    version: Option<&str>,
) -> ModelResult<()> {
    fs::create_dir_all(dir)?;

    let blob = bincode::serialize(pipeline)
        .map_err(|e| ModelError::serialization(format!("pipeline encode failed: {e}")))?;
    fs::write(dir.join(PIPELINE_FILE), blob)?;

    let names = serde_json::to_string_pretty(feature_names)
        .map_err(|e| ModelError::serialization(format!("feature manifest encode failed: {e}")))?;
    fs::write(dir.join(FEATURE_NAMES_FILE), names)?;

    let summary = serde_json::to_string_pretty(metrics)
        .map_err(|e| ModelError::serialization(format!("metrics encode failed: {e}")))?;
    fs::write(dir.join(METRICS_FILE), summary)?;

    if let Some(tag) = version {
        fs::write(dir.join(MODEL_VERSION_FILE), tag)?;
    }

    info!(dir = %dir.display(), "Saved model artifacts");
    Ok(())
}

/// Load the pipeline and its feature-name manifest from `dir`.
///
/// An absent pipeline or manifest file reports [`ModelError::ArtifactsMissing`];
/// files that exist but cannot be read or decoded report I/O or
/// [`ModelError::Serialization`] errors instead, so callers can tell
/// "never trained" apart from "corrupt".
pub fn load_artifacts(dir: &Path) -> ModelResult<(Pipeline, Vec<String>)> {
    let pipeline_path = dir.join(PIPELINE_FILE);
    let names_path = dir.join(FEATURE_NAMES_FILE);
    if !pipeline_path.exists() || !names_path.exists() {
        return Err(ModelError::artifacts_missing(format!(
            "expected {PIPELINE_FILE} and {FEATURE_NAMES_FILE} under {}",
            dir.display()
        )));
    }

    let blob = fs::read(&pipeline_path)?;
    let pipeline: Pipeline = bincode::deserialize(&blob)
        .map_err(|e| ModelError::serialization(format!("pipeline decode failed: {e}")))?;

    let names = fs::read_to_string(&names_path)?;
    let feature_names: Vec<String> = serde_json::from_str(&names)
        .map_err(|e| ModelError::serialization(format!("feature manifest decode failed: {e}")))?;

    info!(dir = %dir.display(), "Loaded model artifacts");
    Ok((pipeline, feature_names))
}

/// Read the version tag, if the training run wrote one.
pub fn read_model_version(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join(MODEL_VERSION_FILE))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::ModelKind;
    use ndarray::array;
    use tempfile::tempdir;

    fn fitted_pipeline() -> Pipeline {
        let features = array![[1.0, -1.0], [2.0, 0.0], [3.0, 1.0], [4.0, 0.5]];
        let targets = array![2.0, 4.0, 6.0, 8.0];
        Pipeline::fit(ModelKind::Linear, features.view(), targets.view()).unwrap()
    }

    fn sample_metrics() -> TrainingMetrics {
        TrainingMetrics {
            model: "linear".to_string(),
            seed: 42,
            test_size: 0.2,
            rmse: 1.0,
            n_train: 3,
            n_test: 1,
        }
    }

    #[test]
    fn test_save_writes_expected_files() {
        let dir = tempdir().unwrap();
        let names = vec!["a".to_string(), "b".to_string()];

        save_artifacts(
            dir.path(),
            &fitted_pipeline(),
            &names,
            &sample_metrics(),
            None,
        )
        .unwrap();

        assert!(dir.path().join(PIPELINE_FILE).exists());
        assert!(dir.path().join(FEATURE_NAMES_FILE).exists());
        assert!(dir.path().join(METRICS_FILE).exists());
        assert!(!dir.path().join(MODEL_VERSION_FILE).exists());
    }

    #[test]
    fn test_round_trip_preserves_predictions() {
        let dir = tempdir().unwrap();
        let pipeline = fitted_pipeline();
        let names = vec!["a".to_string(), "b".to_string()];

        save_artifacts(dir.path(), &pipeline, &names, &sample_metrics(), None).unwrap();
        let (loaded, loaded_names) = load_artifacts(dir.path()).unwrap();

        assert_eq!(loaded_names, names);
        let row = [2.5, 0.25];
        assert_eq!(
            pipeline.predict_row(&row).to_bits(),
            loaded.predict_row(&row).to_bits()
        );
    }

    #[test]
    fn test_version_tag_round_trip() {
        let dir = tempdir().unwrap();
        let names = vec!["a".to_string(), "b".to_string()];

        assert_eq!(read_model_version(dir.path()), None);

        save_artifacts(
            dir.path(),
            &fitted_pipeline(),
            &names,
            &sample_metrics(),
            Some("2024-06-01"),
        )
        .unwrap();
        assert_eq!(read_model_version(dir.path()).as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn test_load_from_empty_dir_reports_missing() {
        let dir = tempdir().unwrap();
        let result = load_artifacts(dir.path());
        assert!(matches!(result, Err(ModelError::ArtifactsMissing(_))));
    }

    #[test]
    fn test_load_corrupt_pipeline_reports_serialization() {
        let dir = tempdir().unwrap();
        let names = vec!["a".to_string(), "b".to_string()];
        save_artifacts(
            dir.path(),
            &fitted_pipeline(),
            &names,
            &sample_metrics(),
            None,
        )
        .unwrap();

        fs::write(dir.path().join(PIPELINE_FILE), b"not a pipeline").unwrap();
        let result = load_artifacts(dir.path());
        assert!(matches!(result, Err(ModelError::Serialization(_))));
    }

    #[test]
    fn test_load_corrupt_manifest_reports_serialization() {
        let dir = tempdir().unwrap();
        let names = vec!["a".to_string(), "b".to_string()];
        save_artifacts(
            dir.path(),
            &fitted_pipeline(),
            &names,
            &sample_metrics(),
            None,
        )
        .unwrap();

        fs::write(dir.path().join(FEATURE_NAMES_FILE), b"{ not json").unwrap();
        let result = load_artifacts(dir.path());
        assert!(matches!(result, Err(ModelError::Serialization(_))));
    }

    #[test]
    fn test_blank_version_file_reads_as_none() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MODEL_VERSION_FILE), "  \n").unwrap();
        assert_eq!(read_model_version(dir.path()), None);
    }
}
