//! # Prediction Service
//!
//! Coordinates a single prediction:
//! 1. Validate the request and build the feature vector
//! 2. Run the classifier
//! 3. Label the predicted class
//! 4. Pick the activity recommendation
//!
//! The model is loaded once at startup and shared read-only; the service
//! holds no other state, so concurrent requests never interact.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use classifier::{Classifier, ModelError, SvcModel};
use data_loader::BulkClass;
use pipeline::{
    recommend_activity, MarineConditions, PredictionRequest, RequestError, SeaCondition,
};

/// Response returned for every successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub bulk_class: BulkClass,
    pub sea_condition: SeaCondition,
    pub activity: &'static str,
    pub message: &'static str,
}

/// Errors that can occur while serving a prediction
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("model failed to predict: {0}")]
    Model(#[from] ModelError),
}

/// Shared prediction pipeline
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Load the model artifact and build the service
    pub fn from_artifact(path: &Path) -> Result<Self> {
        let model = SvcModel::load(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;
        Ok(Self::new(Arc::new(model)))
    }

    pub fn classes(&self) -> &[BulkClass] {
        self.model.classes()
    }

    /// Validate a raw request and predict
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ServiceError> {
        let conditions = request.validate()?;
        self.predict_conditions(&conditions)
    }

    /// Predict from already validated conditions
    pub fn predict_conditions(
        &self,
        conditions: &MarineConditions,
    ) -> Result<PredictionResponse, ServiceError> {
        let start = Instant::now();

        let features = conditions.to_features();
        let windspeed_ms = conditions.windspeed_ms();
        debug!("Feature vector: {:?}", features.as_array());

        let bulk_class = self.model.predict(&features)?;
        let sea_condition = SeaCondition::from_class(bulk_class);
        let recommendation = recommend_activity(bulk_class, windspeed_ms);

        info!(
            "Predicted bulk {} ({}) at {:.2} m/s wind -> {} in {:.2?}",
            bulk_class,
            sea_condition,
            windspeed_ms,
            recommendation.activity,
            start.elapsed()
        );

        Ok(PredictionResponse {
            bulk_class,
            sea_condition,
            activity: recommendation.activity,
            message: recommendation.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::FeatureVector;
    use pipeline::NumericValue;

    /// Classifier that answers with a fixed class and remembers nothing
    struct FixedClassifier(BulkClass);

    impl Classifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> classifier::Result<BulkClass> {
            Ok(self.0)
        }

        fn classes(&self) -> &[BulkClass] {
            &[0, 1, 2]
        }
    }

    /// Classifier keyed on sigheight, so the feature order is observable
    struct SigheightClassifier;

    impl Classifier for SigheightClassifier {
        fn predict(&self, features: &FeatureVector) -> classifier::Result<BulkClass> {
            let sigheight = features.as_array()[0];
            Ok(if sigheight < 1.0 {
                0
            } else if sigheight < 2.0 {
                1
            } else {
                2
            })
        }

        fn classes(&self) -> &[BulkClass] {
            &[0, 1, 2]
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, _features: &FeatureVector) -> classifier::Result<BulkClass> {
            Err(ModelError::InvalidInput("boom".to_string()))
        }

        fn classes(&self) -> &[BulkClass] {
            &[]
        }
    }

    fn request(sigheight: f64, windspeed_knots: f64) -> PredictionRequest {
        PredictionRequest {
            sigheight: Some(NumericValue::Number(sigheight)),
            swellheight: Some(NumericValue::Number(1.0)),
            period: Some(NumericValue::Number(10.0)),
            windspeed: Some(NumericValue::Number(windspeed_knots)),
            winddirdegree: Some(NumericValue::Number(180.0)),
        }
    }

    #[test]
    fn test_predict_combines_label_and_advice() {
        let service = PredictionService::new(Arc::new(SigheightClassifier));

        // 8 kts = 4.1 m/s, low wind
        let response = service.predict(&request(1.5, 8.0)).unwrap();
        assert_eq!(response.bulk_class, 1);
        assert_eq!(response.sea_condition, SeaCondition::Surfable);
        assert_eq!(response.activity, "Surfing 🏄‍♀️");

        // 14 kts = 7.2 m/s, medium wind
        let response = service.predict(&request(2.5, 14.0)).unwrap();
        assert_eq!(response.bulk_class, 2);
        assert_eq!(
            response.activity,
            "Advanced surfing / challenging conditions ⚠️"
        );
    }

    #[test]
    fn test_wind_is_converted_before_recommending() {
        let service = PredictionService::new(Arc::new(FixedClassifier(0)));

        // 17.49 kts is 8.998 m/s: still calm for a flat sea
        let response = service.predict(&request(0.3, 17.49)).unwrap();
        assert_eq!(response.activity, "Swimming & SUP 🏊‍♂️");

        // 17.5 kts is 9.003 m/s
        let response = service.predict(&request(0.3, 17.5)).unwrap();
        assert_eq!(response.activity, "Kitesurf / Windsurf 🪁");
    }

    #[test]
    fn test_unexpected_class_maps_to_unknown() {
        let service = PredictionService::new(Arc::new(FixedClassifier(7)));
        let response = service.predict(&request(1.0, 5.0)).unwrap();

        assert_eq!(response.bulk_class, 7);
        assert_eq!(response.sea_condition, SeaCondition::Unknown);
        assert_eq!(response.activity, "Unknown");
    }

    #[test]
    fn test_invalid_request_is_rejected_before_model() {
        let service = PredictionService::new(Arc::new(FailingClassifier));
        let mut bad = request(1.0, 5.0);
        bad.windspeed = None;

        assert!(matches!(
            service.predict(&bad),
            Err(ServiceError::Request(RequestError::MissingField("windspeed")))
        ));
    }

    #[test]
    fn test_model_failure_is_surfaced() {
        let service = PredictionService::new(Arc::new(FailingClassifier));
        assert!(matches!(
            service.predict(&request(1.0, 5.0)),
            Err(ServiceError::Model(_))
        ));
    }

    #[test]
    fn test_response_serialization() {
        let service = PredictionService::new(Arc::new(FixedClassifier(1)));
        let response = service.predict(&request(1.0, 4.0)).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["bulk_class"], 1);
        assert_eq!(json["sea_condition"], "Medium, surfable waves");
        assert_eq!(json["activity"], "Surfing 🏄‍♀️");
        assert!(json["message"].as_str().unwrap().starts_with("Medium-sized waves"));
    }

    #[test]
    fn test_from_artifact_missing_file() {
        let result = PredictionService::from_artifact(Path::new("no/such/model.json"));
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Failed to load model"));
    }
}
