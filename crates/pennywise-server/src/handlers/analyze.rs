//! Analysis handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{AppError, AppState};
use pennywise_core::{
    ingest::records_from_value, Achievement, AnalysisReport, AnalyticsEngine, Personality,
    Scenario,
};

/// Status text when an oracle is loaded
pub const STATUS_AI: &str = "AI Model Loaded ✅";

/// Status text when running rule-based only
pub const STATUS_RULES: &str = "Rule-based Analysis";

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub version: Option<String>,
    pub status: &'static str,
}

/// Response for a successful analysis
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub scenarios: Vec<Scenario>,
    pub personality: Option<Personality>,
    pub achievements: Vec<Achievement>,
    pub ai_powered: bool,
    pub model_info: ModelInfo,
}

impl AnalyzeResponse {
    /// Wrap a report with the engine's oracle metadata
    pub fn from_report(report: AnalysisReport, engine: &AnalyticsEngine) -> Self {
        let ai_powered = engine.ai_powered();
        Self {
            success: true,
            scenarios: report.scenarios,
            personality: report.personality,
            achievements: report.achievements,
            ai_powered,
            model_info: ModelInfo {
                version: engine.model_version().map(str::to_string),
                status: if ai_powered { STATUS_AI } else { STATUS_RULES },
            },
        }
    }
}

/// POST /analyze - Run the analytics pipeline over a transaction list
///
/// The body is `{"transactions": [...]}`; a missing list means no
/// transactions. A record that cannot be coerced rejects the whole request
/// with 400.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| {
        warn!(error = %rejection, "Invalid analysis request body");
        AppError::bad_request(&rejection.body_text())
    })?;

    let transactions = records_from_value(body).map_err(AppError::from_core)?;
    debug!(count = transactions.len(), "Analysis requested");

    let report = state
        .engine
        .analyze(&transactions)
        .map_err(AppError::from_core)?;

    Ok(Json(AnalyzeResponse::from_report(report, &state.engine)))
}
