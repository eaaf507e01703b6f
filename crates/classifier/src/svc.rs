//! RBF support-vector classifier with one-vs-one voting.
//!
//! The artifact is a JSON export of an already fitted model: the scaler
//! statistics, the support vectors grouped by class, the dual coefficients
//! and one intercept per class pair. Layout of `dual_coef` follows libsvm:
//! `k - 1` rows, one column per support vector.

use crate::error::{ModelError, Result};
use crate::scaler::StandardScaler;
use crate::Classifier;
use data_loader::{BulkClass, FeatureVector, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

fn default_feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Fitted scaler + RBF SVC pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvcModel {
    /// Feature order the model was trained with
    #[serde(default = "default_feature_names")]
    pub feature_names: Vec<String>,
    pub scaler: StandardScaler,
    /// Class labels, in the order the coefficients refer to them
    pub classes: Vec<BulkClass>,
    pub gamma: f64,
    /// Support vectors, grouped by class in `classes` order
    pub support_vectors: Vec<[f64; 5]>,
    /// Number of support vectors per class
    pub n_support: Vec<usize>,
    pub dual_coef: Vec<Vec<f64>>,
    /// One value per class pair (0,1), (0,2), ..., (1,2), ...
    pub intercept: Vec<f64>,
}

impl SvcModel {
    /// Load and validate a model artifact
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading model artifact from {:?}", path);
        let reader = BufReader::new(File::open(path)?);
        let model: SvcModel = serde_json::from_reader(reader)?;
        model.validate()?;
        info!(
            "Loaded SVC with {} classes and {} support vectors",
            model.classes.len(),
            model.support_vectors.len()
        );
        Ok(model)
    }

    /// Write the artifact as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Check that every array has the shape the class count implies
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ModelError::InvalidArtifact(msg));
        let k = self.classes.len();
        let n_sv = self.support_vectors.len();

        if self.feature_names != default_feature_names() {
            return invalid(format!(
                "feature order {:?} does not match {:?}",
                self.feature_names, FEATURE_NAMES
            ));
        }
        if k == 0 {
            return invalid("no classes".to_string());
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return invalid(format!("gamma must be positive, got {}", self.gamma));
        }
        if !self.scaler.is_finite() {
            return invalid("scaler contains non-finite values".to_string());
        }
        if self.n_support.len() != k {
            return invalid(format!(
                "n_support has {} entries for {} classes",
                self.n_support.len(),
                k
            ));
        }
        if self.n_support.iter().sum::<usize>() != n_sv {
            return invalid(format!(
                "n_support sums to {} but there are {} support vectors",
                self.n_support.iter().sum::<usize>(),
                n_sv
            ));
        }
        if self.dual_coef.len() != k - 1 {
            return invalid(format!(
                "dual_coef has {} rows, expected {}",
                self.dual_coef.len(),
                k - 1
            ));
        }
        if let Some(row) = self.dual_coef.iter().find(|row| row.len() != n_sv) {
            return invalid(format!(
                "dual_coef row has {} entries, expected {}",
                row.len(),
                n_sv
            ));
        }
        if self.intercept.len() != k * (k - 1) / 2 {
            return invalid(format!(
                "intercept has {} entries, expected {}",
                self.intercept.len(),
                k * (k - 1) / 2
            ));
        }
        Ok(())
    }

    fn kernel(&self, a: &[f64; 5], b: &[f64; 5]) -> f64 {
        let dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
        (-self.gamma * dist).exp()
    }

    /// Index into `classes` of the winning class
    fn vote(&self, scaled: &[f64; 5]) -> usize {
        let k = self.classes.len();
        let kernel: Vec<f64> = self
            .support_vectors
            .iter()
            .map(|sv| self.kernel(sv, scaled))
            .collect();

        let mut start = vec![0usize; k];
        for i in 1..k {
            start[i] = start[i - 1] + self.n_support[i - 1];
        }

        let mut votes = vec![0usize; k];
        let mut pair = 0;
        for i in 0..k {
            for j in (i + 1)..k {
                let class_i = start[i]..start[i] + self.n_support[i];
                let class_j = start[j]..start[j] + self.n_support[j];

                let mut decision = self.intercept[pair];
                for sv in class_i {
                    decision += self.dual_coef[j - 1][sv] * kernel[sv];
                }
                for sv in class_j {
                    decision += self.dual_coef[i][sv] * kernel[sv];
                }

                if decision > 0.0 {
                    votes[i] += 1;
                } else {
                    votes[j] += 1;
                }
                pair += 1;
            }
        }

        let mut best = 0;
        for (idx, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = idx;
            }
        }
        best
    }
}

impl Classifier for SvcModel {
    fn predict(&self, features: &FeatureVector) -> Result<BulkClass> {
        if let Some(bad) = features.as_array().iter().position(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "{} is not a finite number",
                FEATURE_NAMES[bad]
            )));
        }
        let scaled = self.scaler.transform(features);
        Ok(self.classes[self.vote(&scaled)])
    }

    fn classes(&self) -> &[BulkClass] {
        &self.classes
    }
}
