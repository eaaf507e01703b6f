//! Hold-out evaluation of a fitted classifier.
//!
//! Splits the training table the same way the model was validated (80/20,
//! stratified by class, fixed seed), predicts the held-out rows and reports
//! accuracy, per-class precision/recall/F1 and a confusion matrix.

use crate::error::{ModelError, Result};
use crate::Classifier;
use data_loader::{BulkClass, FeatureVector, TrainingRow};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Labels reported in the confusion matrix
pub const REPORT_LABELS: [BulkClass; 3] = [0, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationConfig {
    /// Fraction of rows held out, in (0, 1)
    pub test_size: f64,
    pub seed: u64,
    /// Keep class proportions in both parts
    pub stratify: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            stratify: true,
        }
    }
}

/// Row indices of a train/test split
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices into train and test parts
///
/// With `stratify`, each class is shuffled and split on its own so the
/// held-out part keeps the class balance. Both parts are returned sorted.
pub fn train_test_split(rows: &[TrainingRow], config: &EvaluationConfig) -> Result<Split> {
    if !(config.test_size > 0.0 && config.test_size < 1.0) {
        return Err(ModelError::InvalidConfig(format!(
            "test_size must be between 0 and 1, got {}",
            config.test_size
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);

    let groups: Vec<Vec<usize>> = if config.stratify {
        let mut by_class: BTreeMap<BulkClass, Vec<usize>> = BTreeMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_class.entry(row.bulk).or_insert_with(Vec::new).push(idx);
        }
        by_class.into_values().collect()
    } else {
        vec![(0..rows.len()).collect()]
    };

    let mut split = Split {
        train: Vec::new(),
        test: Vec::new(),
    };
    for mut group in groups {
        group.shuffle(&mut rng);
        let n_test = (group.len() as f64 * config.test_size).round() as usize;
        split.test.extend_from_slice(&group[..n_test]);
        split.train.extend_from_slice(&group[n_test..]);
    }

    split.train.sort_unstable();
    split.test.sort_unstable();
    Ok(split)
}

/// Confusion matrix: rows are true labels, columns predicted labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<BulkClass>,
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Pairs whose true or predicted label is outside `labels` are ignored
    pub fn new(labels: &[BulkClass], truth: &[BulkClass], predicted: &[BulkClass]) -> Self {
        let n = labels.len();
        let mut counts = vec![vec![0usize; n]; n];
        let index = |label: BulkClass| labels.iter().position(|&l| l == label);

        for (&t, &p) in truth.iter().zip(predicted) {
            if let (Some(i), Some(j)) = (index(t), index(p)) {
                counts[i][j] += 1;
            }
        }

        Self {
            labels: labels.to_vec(),
            counts,
        }
    }

    fn column_sum(&self, j: usize) -> usize {
        self.counts.iter().map(|row| row[j]).sum()
    }
}

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub label: BulkClass,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
    pub per_class: Vec<ClassReport>,
    pub confusion: ConfusionMatrix,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Compute the report from true and predicted labels
pub fn score(truth: &[BulkClass], predicted: &[BulkClass], train_size: usize) -> EvaluationReport {
    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    let confusion = ConfusionMatrix::new(&REPORT_LABELS, truth, predicted);

    let per_class = confusion
        .labels
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let tp = confusion.counts[i][i];
            let support = truth.iter().filter(|&&t| t == label).count();
            let precision = ratio(tp, confusion.column_sum(i));
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassReport {
                label,
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    EvaluationReport {
        train_size,
        test_size: truth.len(),
        accuracy: ratio(correct, truth.len()),
        per_class,
        confusion,
    }
}

/// Evaluate a classifier on the held-out part of `rows`
pub fn evaluate(
    model: &dyn Classifier,
    rows: &[TrainingRow],
    config: &EvaluationConfig,
) -> Result<EvaluationReport> {
    let split = train_test_split(rows, config)?;
    if split.test.is_empty() {
        return Err(ModelError::InvalidConfig(
            "test split is empty; dataset too small".to_string(),
        ));
    }
    info!(
        "Evaluating on {} held-out rows ({} train)",
        split.test.len(),
        split.train.len()
    );

    let features: Vec<FeatureVector> = split.test.iter().map(|&i| rows[i].features()).collect();
    let truth: Vec<BulkClass> = split.test.iter().map(|&i| rows[i].bulk).collect();
    let predicted = model.predict_batch(&features)?;

    let report = score(&truth, &predicted, split.train.len());
    info!("Accuracy on test set: {:.2}%", report.accuracy * 100.0);
    Ok(report)
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy on test set: {:.2}%", self.accuracy * 100.0)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>8} {:>10} {:>10} {:>10} {:>10}",
            "class", "precision", "recall", "f1-score", "support"
        )?;
        for class in &self.per_class {
            writeln!(
                f,
                "{:>8} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows = true, columns = predicted):")?;
        write!(f, "{:>8}", "")?;
        for label in &self.confusion.labels {
            write!(f, " {:>6}", label)?;
        }
        writeln!(f)?;
        for (label, row) in self.confusion.labels.iter().zip(&self.confusion.counts) {
            write!(f, "{:>8}", label)?;
            for count in row {
                write!(f, " {:>6}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
