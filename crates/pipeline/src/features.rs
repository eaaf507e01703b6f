//! Feature assembly for prediction requests.
//!
//! Requests describe conditions the way a user reads a forecast (wind in
//! knots); the classifier was trained on wind in m/s. This module validates
//! the request and builds the feature vector in training order.

use data_loader::FeatureVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 1 knot in meters/second
pub const KNOTS_TO_MS: f64 = 0.514444;

pub fn knots_to_ms(knots: f64) -> f64 {
    knots * KNOTS_TO_MS
}

/// Errors raised while validating a prediction request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field '{0}' must be a finite number")]
    NonFinite(&'static str),
}

/// A request value: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Number(value)
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        NumericValue::Text(value.to_string())
    }
}

/// Prediction request as received from a client
///
/// All fields are optional at the wire level so a missing one can be
/// reported by name instead of as a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub sigheight: Option<NumericValue>,
    pub swellheight: Option<NumericValue>,
    pub period: Option<NumericValue>,
    /// Wind speed in knots
    pub windspeed: Option<NumericValue>,
    pub winddirdegree: Option<NumericValue>,
}

/// Validated request values, wind still in knots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarineConditions {
    pub sigheight: f64,
    pub swellheight: f64,
    pub period: f64,
    pub windspeed_knots: f64,
    pub winddirdegree: f64,
}

fn require(field: &'static str, value: Option<&NumericValue>) -> Result<f64, RequestError> {
    let number = match value.ok_or(RequestError::MissingField(field))? {
        NumericValue::Number(n) => *n,
        NumericValue::Text(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| RequestError::InvalidNumber {
                    field,
                    value: text.clone(),
                })?
        }
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(RequestError::NonFinite(field))
    }
}

impl PredictionRequest {
    /// Check every field is present and numeric
    pub fn validate(&self) -> Result<MarineConditions, RequestError> {
        Ok(MarineConditions {
            sigheight: require("sigheight", self.sigheight.as_ref())?,
            swellheight: require("swellheight", self.swellheight.as_ref())?,
            period: require("period", self.period.as_ref())?,
            windspeed_knots: require("windspeed", self.windspeed.as_ref())?,
            winddirdegree: require("winddirdegree", self.winddirdegree.as_ref())?,
        })
    }

    /// Validate, then return the feature vector and the wind speed in m/s
    pub fn to_features(&self) -> Result<(FeatureVector, f64), RequestError> {
        let conditions = self.validate()?;
        Ok((conditions.to_features(), conditions.windspeed_ms()))
    }
}

impl MarineConditions {
    pub fn windspeed_ms(&self) -> f64 {
        knots_to_ms(self.windspeed_knots)
    }

    /// Feature vector in training order, wind converted to m/s
    pub fn to_features(&self) -> FeatureVector {
        FeatureVector::new(
            self.sigheight,
            self.swellheight,
            self.period,
            self.windspeed_ms(),
            self.winddirdegree,
        )
    }
}
