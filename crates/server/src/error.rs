//! Mapping of prediction failures onto HTTP responses.
//!
//! Every error body has the shape `{"error": "<message>"}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::service::ServiceError;

/// Errors returned by the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body, missing field, or a value that is not a number
    #[error("{0}")]
    BadRequest(String),

    /// The model could not produce a prediction
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Request(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::Model(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(msg) => warn!("Rejected prediction request: {}", msg),
            ApiError::Internal(msg) => error!("Prediction failed: {}", msg),
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
