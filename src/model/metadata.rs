//! Model Metadata
//!
//! Loads the JSON artifacts produced alongside the trained model:
//! `feature_metadata.json` (canonical feature list, defaults, clinical
//! mapping, SHAP importance) and `model_metadata.json` (name, training
//! date, performance metrics).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PredictionError;
use crate::risk::features::FeatureSchema;

pub const FEATURE_METADATA_FILE: &str = "feature_metadata.json";
pub const MODEL_METADATA_FILE: &str = "model_metadata.json";

// ============================================================================
// ARTIFACT FILE SCHEMAS
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeatureMetadataFile {
    feature_names: Vec<String>,
    #[serde(default)]
    default_values: HashMap<String, f64>,
    #[serde(default)]
    clinical_mapping: Value,
    #[serde(default)]
    feature_importance_shap: Value,
}

#[derive(Debug, Deserialize)]
struct ModelMetadataFile {
    model_name: String,
    training_date: String,
    performance_metrics: BTreeMap<String, f64>,
}

// ============================================================================
// LOADED METADATA
// ============================================================================

/// Read-only metadata for the loaded model
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub model_name: String,
    /// Training date doubles as the model version string
    pub model_version: String,
    /// Reported performance: at least `auroc` and `accuracy`
    pub performance: BTreeMap<String, f64>,
    /// Feature name -> clinical description (opaque passthrough)
    pub clinical_mapping: Value,
    /// Static SHAP importance from training (opaque passthrough)
    pub feature_importance: Value,
    pub schema: FeatureSchema,
}

/// Load and validate metadata from `model_dir`.
///
/// # Errors
/// Returns `MissingArtifact` when a file is absent, unreadable, or
/// malformed, and `SchemaMismatch` when the feature list is empty.
pub fn load(model_dir: &Path) -> Result<ModelMetadata, PredictionError> {
    let features: FeatureMetadataFile = read_json(&model_dir.join(FEATURE_METADATA_FILE))?;
    let model: ModelMetadataFile = read_json(&model_dir.join(MODEL_METADATA_FILE))?;

    // Metadata-provided defaults overlay the built-in table
    let mut defaults = FeatureSchema::builtin_defaults();
    defaults.extend(features.default_values);

    let schema = FeatureSchema::new(features.feature_names, defaults)?;

    let auroc = metric(&model.performance_metrics, "auroc")?;
    let accuracy = metric(&model.performance_metrics, "test_accuracy")?;
    let performance = BTreeMap::from([
        ("auroc".to_string(), auroc),
        ("accuracy".to_string(), accuracy),
    ]);

    tracing::info!(
        model_name = %model.model_name,
        auroc = auroc,
        features = schema.len(),
        "model metadata loaded"
    );

    Ok(ModelMetadata {
        model_name: model.model_name,
        model_version: model.training_date,
        performance,
        clinical_mapping: features.clinical_mapping,
        feature_importance: features.feature_importance_shap,
        schema,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PredictionError> {
    let bytes = fs::read(path)
        .map_err(|e| PredictionError::MissingArtifact(format!("{}: {}", path.display(), e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| PredictionError::MissingArtifact(format!("{}: {}", path.display(), e)))
}

fn metric(metrics: &BTreeMap<String, f64>, name: &str) -> Result<f64, PredictionError> {
    metrics.get(name).copied().ok_or_else(|| {
        PredictionError::MissingArtifact(format!(
            "{}: performance_metrics.{} missing",
            MODEL_METADATA_FILE, name
        ))
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifacts(dir: &Path, feature_json: &str, model_json: &str) {
        let mut f = fs::File::create(dir.join(FEATURE_METADATA_FILE)).unwrap();
        f.write_all(feature_json.as_bytes()).unwrap();
        let mut f = fs::File::create(dir.join(MODEL_METADATA_FILE)).unwrap();
        f.write_all(model_json.as_bytes()).unwrap();
    }

    const FEATURES: &str = r#"{
        "feature_names": ["age", "bmi", "systolic_bp"],
        "default_values": {"bmi": 26.5},
        "clinical_mapping": {"bmi": "Body Mass Index"}
    }"#;

    const MODEL: &str = r#"{
        "model_name": "XGBoost",
        "training_date": "2025-09-09",
        "performance_metrics": {"auroc": 0.91, "test_accuracy": 0.87}
    }"#;

    #[test]
    fn test_load_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), FEATURES, MODEL);

        let metadata = load(dir.path()).unwrap();
        assert_eq!(metadata.model_name, "XGBoost");
        assert_eq!(metadata.model_version, "2025-09-09");
        assert_eq!(metadata.performance["auroc"], 0.91);
        assert_eq!(metadata.performance["accuracy"], 0.87);
        assert_eq!(metadata.schema.len(), 3);

        // File default overrides the built-in table entry
        assert_eq!(metadata.schema.default_for("bmi"), 26.5);
        // Built-in default survives where the file is silent
        assert_eq!(metadata.schema.default_for("age"), 50.0);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, PredictionError::MissingArtifact(_)));
    }

    #[test]
    fn test_empty_feature_list_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            r#"{"feature_names": []}"#,
            MODEL,
        );

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch));
    }

    #[test]
    fn test_missing_metric_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            FEATURES,
            r#"{
                "model_name": "XGBoost",
                "training_date": "2025-09-09",
                "performance_metrics": {"auroc": 0.91}
            }"#,
        );

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, PredictionError::MissingArtifact(_)));
    }
}
