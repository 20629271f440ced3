//! Per-column descriptive statistics for a dataset.

use crate::data::{Column, ColumnKind, Dataset};
use crate::error::Result;
use crate::profile::shape::{detect_shape, ShapePattern};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in a value distribution.
const TOP_VALUES: usize = 10;

/// Profile of a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Declared column kind.
    pub kind: ColumnKind,
    /// Number of missing values.
    pub null_count: usize,
    /// Missing values as a percentage of the row count (0 when there are
    /// no rows).
    pub null_percentage: f64,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Minimum non-missing value (numeric columns with at least one
    /// non-missing value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum non-missing value (numeric columns with at least one
    /// non-missing value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Up to the ten most frequent non-missing values with their counts,
    /// keyed by rendered string, descending by count, ties in
    /// first-encountered order.
    pub distribution: IndexMap<String, usize>,
    /// Shape shared by all non-missing values (text columns only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_pattern: Option<ShapePattern>,
}

impl std::fmt::Display for ColumnProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Column: {} ({})", self.name, self.kind.as_str())?;
        writeln!(
            f,
            "  Nulls:  {} ({:.2}%)",
            self.null_count, self.null_percentage
        )?;
        writeln!(f, "  Unique: {}", self.unique_count)?;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            writeln!(f, "  Min:    {}", min)?;
            writeln!(f, "  Max:    {}", max)?;
        }
        if let Some(pattern) = self.regex_pattern {
            writeln!(f, "  Shape:  {} ({})", pattern.as_str(), pattern.regex())?;
        }
        if !self.distribution.is_empty() {
            writeln!(f, "  Top values:")?;
            for (value, count) in &self.distribution {
                writeln!(f, "    {}: {}", value, count)?;
            }
        }
        Ok(())
    }
}

/// Profile of a whole dataset: the shared row count plus one profile per
/// column, in input column order.
///
/// The row count is a dedicated field rather than a reserved key in the
/// column mapping, so no column name can collide with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Total number of rows.
    pub row_count: usize,
    /// Column profiles in input order.
    pub columns: Vec<ColumnProfile>,
}

impl DatasetProfile {
    /// Look up a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl std::fmt::Display for DatasetProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dataset Profile")?;
        writeln!(f, "  Rows:    {}", self.row_count)?;
        writeln!(f, "  Columns: {}", self.columns.len())?;
        for column in &self.columns {
            writeln!(f)?;
            write!(f, "{}", column)?;
        }
        Ok(())
    }
}

/// Compute a profile for every column of a dataset in one pass.
///
/// Pure: no side effects, no I/O, and the input is never mutated.
pub fn profile(dataset: &Dataset) -> DatasetProfile {
    let row_count = dataset.n_rows();
    let columns = dataset
        .columns()
        .iter()
        .map(|column| profile_column(column, row_count))
        .collect();
    DatasetProfile { row_count, columns }
}

fn profile_column(column: &Column, row_count: usize) -> ColumnProfile {
    let null_count = column.null_count();
    let null_percentage = if row_count == 0 {
        0.0
    } else {
        null_count as f64 / row_count as f64 * 100.0
    };

    // Frequency of every distinct non-missing value, first-encounter order.
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in column.present() {
        *counts.entry(value.render()).or_insert(0) += 1;
    }
    let unique_count = counts.len();

    let (min, max) = match column.kind() {
        ColumnKind::Numeric => {
            let mut min = None;
            let mut max = None;
            for v in column.numbers() {
                min = Some(min.map_or(v, |m: f64| m.min(v)));
                max = Some(max.map_or(v, |m: f64| m.max(v)));
            }
            (min, max)
        }
        ColumnKind::Text => (None, None),
    };

    let regex_pattern = match column.kind() {
        ColumnKind::Text => detect_shape(counts.keys().map(|k| k.as_str())),
        ColumnKind::Numeric => None,
    };

    ColumnProfile {
        name: column.name().to_string(),
        kind: column.kind(),
        null_count,
        null_percentage,
        unique_count,
        min,
        max,
        distribution: top_values(counts),
        regex_pattern,
    }
}

// Stable sort keeps first-encountered order among equal counts.
fn top_values(counts: IndexMap<String, usize>) -> IndexMap<String, usize> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(TOP_VALUES);
    entries.into_iter().collect()
}
