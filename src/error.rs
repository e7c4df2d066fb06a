//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// Failures inside the prediction pipeline.
///
/// Missing individual patient fields are NOT errors; they are handled by
/// default substitution in the assembler and the rule engine. Everything
/// here fails the whole prediction - there is no safe fallback tier for a
/// health-risk output.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// Classifier or metadata artifact cannot be initialized. Fatal at startup.
    #[error("missing model artifact: {0}")]
    MissingArtifact(String),

    /// A field present in the patient record cannot be coerced to a number.
    #[error("field '{name}' has non-numeric value: {value}")]
    MalformedField { name: String, value: String },

    /// The classifier call failed or returned a malformed distribution.
    #[error("classifier invocation failed: {0}")]
    Classifier(String),

    /// The metadata feature list is empty - no meaningful vector can be assembled.
    #[error("feature schema has no features")]
    SchemaMismatch,
}

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    ValidationError(String),

    // Prediction pipeline errors
    PredictionFailed(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::PredictionFailed(msg) => {
                tracing::error!("Prediction error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            e @ PredictionError::MalformedField { .. } => AppError::ValidationError(e.to_string()),
            other => AppError::PredictionFailed(other.to_string()),
        }
    }
}
