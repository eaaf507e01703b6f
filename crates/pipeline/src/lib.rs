//! Request-side pipeline for wave predictions.
//!
//! This crate provides:
//! - Validation of prediction requests and feature-vector assembly
//! - Sea-condition labels for predicted bulk classes
//! - The activity recommendation table
//!
//! ## Architecture
//! A request flows through three stages:
//! 1. `PredictionRequest::validate` checks fields and parses numbers
//! 2. `MarineConditions::to_features` converts wind to m/s and orders features
//! 3. After the classifier runs, `recommend_activity` turns class + wind into advice
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{recommend_activity, PredictionRequest, SeaCondition};
//!
//! let conditions = request.validate()?;
//! let bulk = model.predict(&conditions.to_features())?;
//! let advice = recommend_activity(bulk, conditions.windspeed_ms());
//! println!("{}: {}", SeaCondition::from_class(bulk), advice.activity);
//! ```

pub mod features;
pub mod recommend;

// Re-export main types
pub use features::{
    knots_to_ms, MarineConditions, NumericValue, PredictionRequest, RequestError, KNOTS_TO_MS,
};
pub use recommend::{recommend_activity, Recommendation, SeaCondition, HIGH_WIND_MS, LOW_WIND_MS};
