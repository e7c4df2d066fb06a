//! Model information handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Detailed model information including static feature importance
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    let metadata = state.model.metadata();

    Json(json!({
        "feature_importance": metadata.feature_importance,
        "clinical_mapping": metadata.clinical_mapping,
        "model_performance": metadata.performance,
    }))
}

/// Required features for prediction
pub async fn features(State(state): State<AppState>) -> Json<Value> {
    let metadata = state.model.metadata();
    let feature_names = metadata.schema.feature_names();

    Json(json!({
        "required_features": feature_names,
        "clinical_mapping": metadata.clinical_mapping,
        "total_features": feature_names.len(),
    }))
}
