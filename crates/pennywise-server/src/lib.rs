//! Pennywise Web Server
//!
//! Axum-based REST API around the Pennywise analytics engine.
//!
//! - `POST /analyze` - scenarios, personality and achievements for a
//!   transaction list
//! - `GET /model-status` - prediction oracle metadata
//! - `GET /health` - liveness and oracle state
//!
//! Security features:
//! - Restrictive CORS policy (configured origins only)
//! - Sanitized error responses

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use pennywise_core::{AnalyticsEngine, AppConfig, OracleHandle};

mod handlers;

pub use handlers::{AnalyzeResponse, ModelInfo, ModelStatusResponse};

/// Shared application state
pub struct AppState {
    pub engine: AnalyticsEngine,
    /// Where the oracle bundle was looked up, reported by `/model-status`
    pub model_path: PathBuf,
}

/// Create the router with the given engine and configuration
pub fn create_router(engine: AnalyticsEngine, config: &AppConfig) -> Router {
    let state = Arc::new(AppState {
        engine,
        model_path: config.oracle.model_path.clone(),
    });

    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/model-status", get(handlers::model_status))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}

/// Start the server
pub async fn serve(config: AppConfig, oracle: OracleHandle) -> anyhow::Result<()> {
    match oracle.version() {
        Some(version) => info!(version, "✅ Prediction oracle ready"),
        None => info!("ℹ️  No prediction oracle loaded, serving rule-based analysis"),
    }

    let addr = config.bind_address();
    let app = create_router(AnalyticsEngine::new(oracle), &config);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error: bad input is the caller's to fix, anything else is
    /// reported generically
    pub fn from_core(err: pennywise_core::Error) -> Self {
        if err.is_input_error() {
            warn!(error = %err, "Rejected analysis request");
            Self::bad_request(&err.to_string())
        } else {
            err.into()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
