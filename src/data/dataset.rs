//! An in-memory tabular dataset: named columns sharing one row count.

use crate::data::Column;
use crate::error::{DqError, Result};
use std::collections::HashSet;

/// An ordered collection of named columns, all sharing the same row count.
///
/// Immutable once constructed; profiling and anomaly scoring treat it as
/// read-only input.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Create a dataset, validating that every column has the same length
    /// and that column names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        let mut seen: HashSet<&str> = HashSet::new();
        for column in &columns {
            if column.len() != row_count {
                return Err(DqError::DimensionMismatch {
                    expected: row_count,
                    actual: column.len(),
                });
            }
            if !seen.insert(column.name()) {
                return Err(DqError::InvalidParameter(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }
        Ok(Self { columns, row_count })
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Columns in input order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Column names in input order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnKind;

    #[test]
    fn test_dimension_check() {
        let err = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::text("b", vec![Some("x")]),
        ])
        .unwrap_err();
        match err {
            DqError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::numeric("a", vec![Some(2.0)]),
        ])
        .unwrap_err();
        assert!(matches!(err, DqError::InvalidParameter(_)));
    }

    #[test]
    fn test_accessors() {
        let ds = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0), None]),
            Column::text("b", vec![Some("x"), Some("y")]),
        ])
        .unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_columns(), 2);
        assert_eq!(ds.column_names(), vec!["a", "b"]);
        assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Numeric);
        assert!(ds.column("c").is_none());
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new(vec![]).unwrap();
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.n_columns(), 0);

        let ds = Dataset::new(vec![Column::numeric("a", Vec::new())]).unwrap();
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.n_columns(), 1);
    }
}
