//! A named, typed column of values.

use crate::data::{ColumnKind, Value};
use crate::error::{DqError, Result};

/// A column: a name, a declared kind, and an ordered sequence of values.
///
/// The kind is fixed at construction. A numeric column may hold only
/// numbers and missing markers; a text column only text and missing
/// markers. Violations fail fast rather than being coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, validating every value against the declared kind.
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        for (row, value) in values.iter().enumerate() {
            if !kind.admits(value) {
                return Err(DqError::InvalidValue {
                    column: name,
                    value: value.render(),
                    row,
                    kind: kind.as_str(),
                });
            }
        }
        Ok(Self { name, kind, values })
    }

    /// Create a numeric column from optional values (`None` is missing).
    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
            values: values
                .into_iter()
                .map(|v| v.map(Value::Number).unwrap_or(Value::Missing))
                .collect(),
        }
    }

    /// Create a text column from optional values (`None` is missing).
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            values: values
                .into_iter()
                .map(|v| v.map(|s| Value::Text(s.into())).unwrap_or(Value::Missing))
                .collect(),
        }
    }

    /// Column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    #[inline]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Number of values (including missing markers).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the column has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of missing markers.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Iterate over non-missing values in order.
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Iterate over non-missing numeric values in order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| v.as_number())
    }
}
