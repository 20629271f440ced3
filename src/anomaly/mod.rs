//! Numeric outlier screening over a dataset's numeric columns.
//!
//! The detector fits per-column location and scale on one dataset and
//! scores rows of another (or the same) dataset by their largest absolute
//! z-score. Model-based detectors (isolation forests and friends) are
//! external collaborators; this module is the in-process screen.

use crate::data::{ColumnKind, Dataset};
use crate::error::{DqError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

/// Configuration for anomaly screening.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyDetector {
    threshold: f64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self { threshold: 3.0 }
    }
}

impl AnomalyDetector {
    /// Create a detector with the default flagging threshold (3.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector flagging rows whose score exceeds `threshold`.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Fit per-column statistics over the dataset's numeric columns.
    ///
    /// Fails with [`DqError::EmptyData`] when the dataset has no numeric
    /// column.
    pub fn fit(&self, dataset: &Dataset) -> Result<FittedDetector> {
        let mut stats = Vec::new();
        for column in dataset.columns() {
            if column.kind() != ColumnKind::Numeric {
                continue;
            }
            let values: Vec<f64> = column.numbers().collect();
            let (mean, std_dev) = if values.len() >= 2 {
                (Statistics::mean(&values), Statistics::std_dev(&values))
            } else {
                (values.first().copied().unwrap_or(0.0), 0.0)
            };
            stats.push(ColumnStats {
                column: column.name().to_string(),
                mean,
                std_dev,
                n_observed: values.len(),
            });
        }
        if stats.is_empty() {
            return Err(DqError::EmptyData(
                "no numeric columns to fit anomaly detector".to_string(),
            ));
        }
        Ok(FittedDetector {
            stats,
            threshold: self.threshold,
        })
    }
}

/// Location and scale fitted for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Column name.
    pub column: String,
    /// Mean of non-missing values.
    pub mean: f64,
    /// Sample standard deviation of non-missing values.
    pub std_dev: f64,
    /// Number of non-missing values observed during fitting.
    pub n_observed: usize,
}

impl ColumnStats {
    /// Absolute z-score of a value under this column's fit. Zero when the
    /// column has no usable scale.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std_dev > 0.0 {
            ((value - self.mean) / self.std_dev).abs()
        } else {
            0.0
        }
    }
}

/// Anomaly score for one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowScore {
    /// Zero-based row index.
    pub row: usize,
    /// Largest absolute z-score across fitted columns.
    pub score: f64,
    /// Two-sided normal tail probability of the score.
    pub tail_probability: f64,
    /// Column producing the score, when any cell was observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// A detector with fitted per-column statistics.
#[derive(Debug, Clone)]
pub struct FittedDetector {
    stats: Vec<ColumnStats>,
    threshold: f64,
}

impl FittedDetector {
    /// Fitted per-column statistics.
    pub fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    /// Flagging threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score every row of a dataset.
    ///
    /// Each fitted column must exist in the dataset and be numeric.
    /// Missing cells contribute nothing; a row with no observed numeric
    /// cell scores zero.
    pub fn score(&self, dataset: &Dataset) -> Result<Vec<RowScore>> {
        // Resolve fitted columns up front so scoring can run in parallel.
        let mut columns = Vec::with_capacity(self.stats.len());
        for stats in &self.stats {
            let column = dataset
                .column(&stats.column)
                .ok_or_else(|| DqError::MissingColumn(stats.column.clone()))?;
            if column.kind() != ColumnKind::Numeric {
                return Err(DqError::InvalidParameter(format!(
                    "column '{}' is not numeric",
                    stats.column
                )));
            }
            columns.push((stats, column));
        }

        let normal = Normal::new(0.0, 1.0).unwrap();
        let scores = (0..dataset.n_rows())
            .into_par_iter()
            .map(|row| {
                let mut best: Option<(f64, &str)> = None;
                for (stats, column) in &columns {
                    if let Some(value) = column.values()[row].as_number() {
                        let z = stats.z_score(value);
                        if best.map_or(true, |(b, _)| z > b) {
                            best = Some((z, stats.column.as_str()));
                        }
                    }
                }
                let (score, column) = match best {
                    Some((z, name)) => (z, Some(name.to_string())),
                    None => (0.0, None),
                };
                RowScore {
                    row,
                    score,
                    tail_probability: 2.0 * (1.0 - normal.cdf(score)),
                    column,
                }
            })
            .collect();
        Ok(scores)
    }

    /// Score rows and keep those exceeding the threshold, in row order.
    pub fn detect(&self, dataset: &Dataset) -> Result<Vec<RowScore>> {
        Ok(self
            .score(dataset)?
            .into_iter()
            .filter(|s| s.score > self.threshold)
            .collect())
    }
}
