//! Prediction response models

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{ClassProbabilities, ModelMetadata};
use crate::risk::types::{Recommendation, RiskAssessment};

/// Per-class probabilities as exposed to callers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassProbabilitiesPayload {
    pub high_risk: f64,
    pub medium_risk: f64,
    pub low_risk: f64,
}

impl From<&ClassProbabilities> for ClassProbabilitiesPayload {
    fn from(probs: &ClassProbabilities) -> Self {
        Self {
            high_risk: probs.high,
            medium_risk: probs.medium,
            low_risk: probs.low,
        }
    }
}

/// Model information attached to every prediction
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub model_version: String,
    pub performance: BTreeMap<String, f64>,
}

impl From<&ModelMetadata> for ModelInfo {
    fn from(metadata: &ModelMetadata) -> Self {
        Self {
            model_name: metadata.model_name.clone(),
            model_version: metadata.model_version.clone(),
            performance: metadata.performance.clone(),
        }
    }
}

/// Complete risk prediction response
#[derive(Debug, Serialize)]
pub struct RiskPrediction {
    pub patient_id: String,
    pub risk_assessment: RiskAssessment,
    pub class_probabilities: ClassProbabilitiesPayload,
    pub recommendations: Vec<Recommendation>,
    pub model_info: ModelInfo,
    pub prediction_timestamp: String,
}
