//! Core domain types for the forecast and sea-condition tables.
//!
//! Three raw tables come in (daily forecast, hourly forecast, observed sea
//! conditions); one cleaned training table goes out. Raw numeric cells are
//! `Option<f64>` because the source exports leave gaps, and the builder is
//! the only place that decides what a gap means.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a forecast day (`iddayforecast` in the raw exports)
pub type DayId = i64;

/// Discrete wave-bulk class predicted by the classifier (0, 1 or 2)
pub type BulkClass = i64;

// =============================================================================
// Raw Tables
// =============================================================================

/// One row of `day_forecast.csv`: identifies a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastRecord {
    #[serde(alias = "iddayforecast")]
    pub id: DayId,
    /// Calendar date as written in the export, e.g. `2023-05-01`
    pub date: String,
}

/// One row of `hour_forecast.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastRecord {
    pub iddayforecast: DayId,
    /// Time of day as HHMM without padding: `0`, `900`, `2300`
    pub time: String,
    pub sigheight: Option<f64>,
    pub swellheight: Option<f64>,
    pub period: Option<f64>,
    /// Wind speed in meters/second
    pub windspeed: Option<f64>,
    pub winddirdegree: Option<f64>,
}

/// One row of `sea_condition_fact.csv`: the observed ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaConditionRecord {
    /// Full timestamp of the observation
    pub date: String,
    pub bulk: Option<f64>,
    pub texture: Option<String>,
    pub shape: Option<String>,
    pub uniformity: Option<String>,
    pub score: Option<String>,
}

// =============================================================================
// Derived Records
// =============================================================================

/// Hourly record enriched with its parent day and matched to an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub hourly: HourlyForecastRecord,
    pub datetime: NaiveDateTime,
    pub bulk: Option<f64>,
    pub texture: Option<String>,
    pub shape: Option<String>,
    pub uniformity: Option<String>,
    pub score: Option<String>,
}

/// Names of the five model inputs, in training order.
pub const FEATURE_NAMES: [&str; 5] = [
    "sigheight",
    "swellheight",
    "period",
    "windspeed",
    "winddirdegree",
];

/// Ordered model input: sigheight, swellheight, period, windspeed (m/s),
/// winddirdegree.
///
/// Training and serving must agree on this order, so everything that feeds
/// the classifier goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; 5]);

impl FeatureVector {
    pub fn new(
        sigheight: f64,
        swellheight: f64,
        period: f64,
        windspeed_ms: f64,
        winddirdegree: f64,
    ) -> Self {
        Self([sigheight, swellheight, period, windspeed_ms, winddirdegree])
    }

    pub fn as_array(&self) -> &[f64; 5] {
        &self.0
    }

    pub fn windspeed_ms(&self) -> f64 {
        self.0[3]
    }
}

/// One clean training example, as persisted in `sea_activity_dataset.csv`.
///
/// Field order matches the CSV header
/// `sigheight,swellheight,period,windspeed,winddirdegree,bulk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub sigheight: f64,
    pub swellheight: f64,
    pub period: f64,
    pub windspeed: f64,
    pub winddirdegree: f64,
    pub bulk: BulkClass,
}

impl TrainingRow {
    pub fn features(&self) -> FeatureVector {
        FeatureVector::new(
            self.sigheight,
            self.swellheight,
            self.period,
            self.windspeed,
            self.winddirdegree,
        )
    }
}
