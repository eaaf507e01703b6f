//! Descriptive statistics over the training table.
//!
//! Used by the `explore` command to sanity-check a freshly built dataset
//! before a model is trained on it.

use crate::types::{BulkClass, TrainingRow, FEATURE_NAMES};
use serde::Serialize;
use std::collections::HashMap;

/// Summary of one feature column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Absolute and relative frequency of one `bulk` class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCount {
    pub bulk: BulkClass,
    pub count: usize,
    pub fraction: f64,
}

/// Summarize every feature column
///
/// Returns an empty Vec for an empty table.
pub fn describe(rows: &[TrainingRow]) -> Vec<FeatureSummary> {
    if rows.is_empty() {
        return Vec::new();
    }

    FEATURE_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let mut values: Vec<f64> = rows.iter().map(|r| r.features().0[i]).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            summarize(name, &values)
        })
        .collect()
}

fn summarize(name: &'static str, sorted: &[f64]) -> FeatureSummary {
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        f64::NAN
    };

    FeatureSummary {
        name,
        count,
        mean,
        std,
        min: sorted[0],
        p25: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        p75: quantile(sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Quantile of sorted values with linear interpolation between neighbours
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Count rows per `bulk` class, most frequent first
pub fn bulk_counts(rows: &[TrainingRow]) -> Vec<ClassCount> {
    let mut counts: HashMap<BulkClass, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.bulk).or_insert(0) += 1;
    }

    let total = rows.len() as f64;
    let mut result: Vec<ClassCount> = counts
        .into_iter()
        .map(|(bulk, count)| ClassCount {
            bulk,
            count,
            fraction: count as f64 / total,
        })
        .collect();

    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.bulk.cmp(&b.bulk)));
    result
}
