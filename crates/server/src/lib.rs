//! Server crate for the WavePredictor service.
//!
//! This crate holds the prediction service that coordinates the request
//! pipeline and the classifier, plus the HTTP layer on top of it.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{router, AppState};
pub use service::{PredictionResponse, PredictionService, ServiceError};
