//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    model_name: String,
    model_version: String,
    features_count: usize,
    timestamp: String,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let metadata = state.model.metadata();

    Json(HealthResponse {
        status: "healthy",
        model_loaded: true,
        model_name: metadata.model_name.clone(),
        model_version: metadata.model_version.clone(),
        features_count: metadata.schema.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
