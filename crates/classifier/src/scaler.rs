//! Per-feature standardization applied before the kernel.

use data_loader::FeatureVector;
use serde::{Deserialize, Serialize};

/// Standardizes each feature as `(x - mean) / scale`.
///
/// A zero scale (constant feature at fit time) divides by one instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: [f64; 5],
    pub scale: [f64; 5],
}

impl StandardScaler {
    /// Scaler that leaves features unchanged
    pub fn identity() -> Self {
        Self {
            mean: [0.0; 5],
            scale: [1.0; 5],
        }
    }

    pub fn transform(&self, features: &FeatureVector) -> [f64; 5] {
        let mut out = [0.0; 5];
        for (i, value) in features.as_array().iter().enumerate() {
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            out[i] = (value - self.mean[i]) / scale;
        }
        out
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.mean.iter().chain(self.scale.iter()).all(|v| v.is_finite())
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::identity()
    }
}
