//! HTTP routes for the prediction service.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use pipeline::PredictionRequest;

use crate::error::ApiError;
use crate::service::{PredictionResponse, PredictionService};

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.service.predict(&request)?;
    Ok(Json(response))
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "classes": state.service.classes(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
