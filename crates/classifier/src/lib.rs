//! Wave-bulk classifier used by the prediction service.
//!
//! The model itself is fitted elsewhere and exported as a JSON artifact.
//! This crate handles:
//! - Loading and validating the artifact
//! - Scaling features and running the RBF support-vector classifier
//! - Evaluating a loaded model against a held-out split of the dataset
//!
//! ## Example Usage
//! ```ignore
//! use classifier::{Classifier, SvcModel};
//! use data_loader::FeatureVector;
//!
//! let model = SvcModel::load(Path::new("model.json"))?;
//! let bulk = model.predict(&FeatureVector::new(1.2, 0.9, 10.0, 4.1, 270.0))?;
//! ```

pub mod error;
pub mod evaluation;
pub mod scaler;
pub mod svc;

use data_loader::{BulkClass, FeatureVector};
use rayon::prelude::*;

pub use error::{ModelError, Result};
pub use evaluation::{evaluate, train_test_split, EvaluationConfig, EvaluationReport};
pub use scaler::StandardScaler;
pub use svc::SvcModel;

/// A fitted model mapping a feature vector to a bulk class.
///
/// `Send + Sync` so one loaded model can be shared read-only across
/// request handlers.
pub trait Classifier: Send + Sync {
    /// Predict the class of a single feature vector
    fn predict(&self, features: &FeatureVector) -> Result<BulkClass>;

    /// Class labels this model can produce
    fn classes(&self) -> &[BulkClass];

    /// Predict many feature vectors in parallel, preserving order
    fn predict_batch(&self, features: &[FeatureVector]) -> Result<Vec<BulkClass>> {
        features.par_iter().map(|f| self.predict(f)).collect()
    }
}
