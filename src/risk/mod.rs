//! Risk stratification core
//!
//! Assembles the feature vector, scores it through the classifier, and
//! layers clinical recommendations on top. Data flows strictly forward:
//! raw record -> assembler -> scorer -> recommendation engine -> response.

pub mod engine;
pub mod features;
pub mod rules;
pub mod scorer;
pub mod types;

pub use types::{PatientRecord, Recommendation, RiskAssessment, RiskLevel};

use crate::error::PredictionError;
use crate::model::ModelContext;
use crate::models::prediction::{ClassProbabilitiesPayload, ModelInfo, RiskPrediction};

/// Run one full prediction cycle for `record`.
///
/// All derived values live only for this call; the context is read-only.
/// Any stage failure fails the whole prediction - a partial result
/// (recommendations without a tier, or vice versa) is never returned.
///
/// # Errors
/// Propagates assembly, classifier, and rule-evaluation errors unmodified.
pub fn predict(
    ctx: &ModelContext,
    patient_id: &str,
    record: &PatientRecord,
) -> Result<RiskPrediction, PredictionError> {
    tracing::debug!(fields = record.len(), "assembling feature vector");
    let vector = features::assemble(record, ctx.schema())?;

    tracing::debug!("running model inference");
    let scored = scorer::score(&vector, ctx.classifier())?;

    tracing::debug!("generating clinical recommendations");
    let recommendations = engine::recommend(
        record,
        scored.assessment.deterioration_probability,
        scored.assessment.risk_level,
    )?;

    Ok(RiskPrediction {
        patient_id: patient_id.to_string(),
        risk_assessment: scored.assessment,
        class_probabilities: ClassProbabilitiesPayload::from(&scored.probabilities),
        recommendations,
        model_info: ModelInfo::from(ctx.metadata()),
        prediction_timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
