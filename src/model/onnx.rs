//! ONNX Classifier
//!
//! Runs the exported 3-class deterioration model through ONNX Runtime.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::PredictionError;
use crate::model::classifier::{ClassProbabilities, Classifier};
use crate::risk::features::FeatureVector;

/// Number of classes the exported model emits
const CLASS_COUNT: usize = 3;

/// ONNX-backed classifier.
///
/// `ort` requires `&mut Session` to run, so the session sits behind a
/// mutex; the handle itself is read-only after load and safe to share
/// across concurrent predictions.
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the exported model from `model_path`.
    ///
    /// # Errors
    /// Returns `MissingArtifact` when the file is absent or the session
    /// cannot be built.
    pub fn load(model_path: &Path) -> Result<Self, PredictionError> {
        tracing::info!("loading ONNX model from {}", model_path.display());

        if !model_path.exists() {
            return Err(PredictionError::MissingArtifact(format!(
                "model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| PredictionError::MissingArtifact(format!("session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PredictionError::MissingArtifact(format!("optimization level: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| PredictionError::MissingArtifact(format!("model load: {}", e)))?;

        tracing::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, vector: &FeatureVector) -> Result<ClassProbabilities, PredictionError> {
        let input_data: Vec<f32> = vector.as_slice().iter().map(|&v| v as f32).collect();

        let input_array = Array2::<f32>::from_shape_vec((1, vector.len()), input_data)
            .map_err(|e| PredictionError::Classifier(format!("array error: {}", e)))?;

        let mut session = self.session.lock();

        // Converted classifiers typically expose a label output followed
        // by the probability output; the probabilities come last.
        let output_name = session
            .outputs
            .last()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictionError::Classifier("no output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictionError::Classifier(format!("tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictionError::Classifier(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| PredictionError::Classifier("no output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictionError::Classifier(format!("extract error: {}", e)))?;

        let data = output_tensor.1;
        if data.len() != CLASS_COUNT {
            return Err(PredictionError::Classifier(format!(
                "expected {} class probabilities, got {}",
                CLASS_COUNT,
                data.len()
            )));
        }

        // Classifier-native class order: high (0), low (1), medium (2)
        Ok(ClassProbabilities::new(
            data[0] as f64,
            data[1] as f64,
            data[2] as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let err = OnnxClassifier::load(Path::new("/nonexistent/final_model.onnx")).unwrap_err();
        assert!(matches!(err, PredictionError::MissingArtifact(_)));
    }
}
