//! Activity recommendations from a predicted wave class and wind speed.
//!
//! Wind bands (m/s):
//! - low: <= 5.0 (about 10 kts)
//! - medium: between 5.0 and 9.0
//! - high: >= 9.0 (about 18 kts and up)
//!
//! Every (class, band) pair maps to one fixed activity and message. Class 0
//! only distinguishes high wind from everything else.

use data_loader::BulkClass;
use serde::Serialize;
use std::fmt;

pub const LOW_WIND_MS: f64 = 5.0;
pub const HIGH_WIND_MS: f64 = 9.0;

/// Human-readable name of a bulk class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeaCondition {
    Flat,
    Surfable,
    Powerful,
    Unknown,
}

impl SeaCondition {
    pub fn from_class(class_id: BulkClass) -> Self {
        match class_id {
            0 => SeaCondition::Flat,
            1 => SeaCondition::Surfable,
            2 => SeaCondition::Powerful,
            _ => SeaCondition::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeaCondition::Flat => "Small / almost flat",
            SeaCondition::Surfable => "Medium, surfable waves",
            SeaCondition::Powerful => "Larger / more powerful waves",
            SeaCondition::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SeaCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SeaCondition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Suggested activity for the predicted conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub activity: &'static str,
    pub message: &'static str,
}

const fn rec(activity: &'static str, message: &'static str) -> Recommendation {
    Recommendation { activity, message }
}

const FLAT_WINDY: Recommendation = rec(
    "Kitesurf / Windsurf 🪁",
    "Waves are very small, but the wind is strong. \
     Great for kitesurfing or windsurfing, not really a surfing day.",
);
const FLAT_CALM: Recommendation = rec(
    "Swimming & SUP 🏊‍♂️",
    "Small, calm sea. Perfect for swimming, relaxing or stand-up paddling, \
     but not really for classic surfing.",
);
const MEDIUM_CLEAN: Recommendation = rec(
    "Surfing 🏄‍♀️",
    "Medium-sized waves and low wind – nice, regular surf conditions \
     for most skill levels.",
);
const MEDIUM_WIND_AFFECTED: Recommendation = rec(
    "Surfing (wind-affected) 🌊",
    "Medium-sized waves with some wind. Still surfable, but conditions \
     might be choppy or less clean.",
);
const MEDIUM_CHOPPY: Recommendation = rec(
    "Choppy surf / wind sports",
    "Medium waves but strong wind. Good for experienced surfers \
     or for mixing in some wind sports.",
);
const LARGE_CLEAN: Recommendation = rec(
    "Advanced surfing only ⚠️",
    "Larger, more powerful waves with low wind. \
     Good for advanced surfers, beginners should be very careful.",
);
const LARGE_CHALLENGING: Recommendation = rec(
    "Advanced surfing / challenging conditions ⚠️",
    "Bigger waves and noticeable wind. Fun for advanced surfers, \
     but demanding and not beginner-friendly.",
);
const LARGE_WINDY: Recommendation = rec(
    "Mostly wind sports / very demanding surf 🪁",
    "Strong wind and larger waves. This is more a day for kitesurfing \
     or windsurfing; surfing will be very heavy and messy.",
);
const UNKNOWN: Recommendation = rec(
    "Unknown",
    "The sea condition is outside the expected range.",
);

/// Map a predicted class and wind speed (m/s) to an activity
///
/// Total over all inputs: classes other than 0, 1 and 2 get the `Unknown`
/// recommendation whatever the wind.
pub fn recommend_activity(class_id: BulkClass, windspeed_ms: f64) -> Recommendation {
    match class_id {
        0 => {
            if windspeed_ms >= HIGH_WIND_MS {
                FLAT_WINDY
            } else {
                FLAT_CALM
            }
        }
        1 => {
            if windspeed_ms <= LOW_WIND_MS {
                MEDIUM_CLEAN
            } else if windspeed_ms < HIGH_WIND_MS {
                MEDIUM_WIND_AFFECTED
            } else {
                MEDIUM_CHOPPY
            }
        }
        2 => {
            if windspeed_ms <= LOW_WIND_MS {
                LARGE_CLEAN
            } else if windspeed_ms < HIGH_WIND_MS {
                LARGE_CHALLENGING
            } else {
                LARGE_WINDY
            }
        }
        _ => UNKNOWN,
    }
}
