//! Status handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub model_loaded: bool,
    pub model_path: String,
    pub version: Option<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_model: &'static str,
}

/// GET /model-status - Prediction oracle metadata
pub async fn model_status(State(state): State<Arc<AppState>>) -> Json<ModelStatusResponse> {
    let oracle = state.engine.oracle();
    Json(ModelStatusResponse {
        model_loaded: oracle.is_loaded(),
        model_path: state.model_path.display().to_string(),
        version: oracle.version().map(str::to_string),
        categories: oracle.categories().to_vec(),
    })
}

/// GET /health - Liveness check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "🚀 Pennywise analytics backend is running!",
        ai_model: if state.engine.ai_powered() {
            "Loaded ✅"
        } else {
            "Not loaded ❌"
        },
    })
}
