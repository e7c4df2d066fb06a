//! Model artifact layer: classifier interface, ONNX adapter, metadata.

pub mod classifier;
pub mod metadata;
pub mod onnx;

use std::path::Path;
use std::sync::Arc;

pub use classifier::{ClassProbabilities, Classifier};
pub use metadata::ModelMetadata;

use crate::error::PredictionError;
use crate::risk::features::FeatureSchema;

/// Exported model file name inside the artifact directory
pub const MODEL_FILE: &str = "final_model.onnx";

/// Read-only handle to the loaded classifier and its metadata.
///
/// Built exactly once at process startup and shared behind `Arc`;
/// concurrent predictions run against it without further coordination.
pub struct ModelContext {
    classifier: Arc<dyn Classifier>,
    metadata: ModelMetadata,
}

impl ModelContext {
    /// Load all model artifacts from `model_dir`. Fatal at startup when
    /// anything is missing; no prediction may proceed without it.
    pub fn load(model_dir: &Path) -> Result<Self, PredictionError> {
        let metadata = metadata::load(model_dir)?;
        let classifier = onnx::OnnxClassifier::load(&model_dir.join(MODEL_FILE))?;

        tracing::info!(
            model_name = %metadata.model_name,
            model_version = %metadata.model_version,
            "model context ready"
        );

        Ok(Self {
            classifier: Arc::new(classifier),
            metadata,
        })
    }

    /// Build a context from parts, mainly for classifier doubles in tests.
    pub fn new(classifier: Arc<dyn Classifier>, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            metadata,
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.metadata.schema
    }
}
