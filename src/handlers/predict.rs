//! Risk prediction handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::models::{PatientData, RiskPrediction};
use crate::{risk, AppError, AppResult, AppState};

/// Predict 90-day deterioration risk for a chronic care patient
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PatientData>,
) -> AppResult<Json<RiskPrediction>> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    tracing::info!(patient_id = %payload.patient_id, "processing risk prediction");

    let record = payload.to_record();
    let prediction = risk::predict(&state.model, &payload.patient_id, &record)?;

    tracing::info!(
        patient_id = %prediction.patient_id,
        risk_level = %prediction.risk_assessment.risk_level,
        urgency = %prediction.risk_assessment.urgency,
        "prediction completed"
    );

    Ok(Json(prediction))
}
