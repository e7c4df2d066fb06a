//! API root handler

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "CareRisk Prediction API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "AI-driven 90-day deterioration risk prediction for chronic care patients",
        "status": "running",
        "endpoints": {
            "/health": "Health check",
            "/predict": "Risk prediction (comprehensive patient data)",
            "/model/info": "Model information",
            "/model/features": "Required features information"
        }
    }))
}
