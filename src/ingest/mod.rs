//! Dataset ingestion from delimited text files.
//!
//! Reads CSV or TSV input into a [`Dataset`], inferring each column's kind
//! at load time: a column whose every non-missing cell parses as a number
//! is numeric, otherwise text. Empty cells and `NA`/`na` are missing.

use crate::data::{Column, ColumnKind, Dataset, Value};
use crate::error::{DqError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Supported delimited-text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl Format {
    /// Field delimiter byte.
    pub fn delimiter(&self) -> u8 {
        match self {
            Format::Csv => b',',
            Format::Tsv => b'\t',
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Ok(Format::Csv),
            Some("tsv") | Some("tab") => Ok(Format::Tsv),
            other => Err(DqError::InvalidParameter(format!(
                "unsupported dataset format for {:?} (extension {:?})",
                path,
                other.unwrap_or("none")
            ))),
        }
    }
}

/// Load a dataset, dispatching on the file extension.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let format = Format::from_path(path.as_ref())?;
    read_delimited(path, format, &HashMap::new())
}

/// Load a dataset from a CSV file with inferred column kinds.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_delimited(path, Format::Csv, &HashMap::new())
}

/// Load a dataset from a TSV file with inferred column kinds.
pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_delimited(path, Format::Tsv, &HashMap::new())
}

/// Load a CSV file with explicit kind overrides for named columns.
///
/// An override to [`ColumnKind::Numeric`] fails fast on the first cell
/// that does not parse as a number; nothing is coerced or dropped.
pub fn read_csv_with_kinds<P: AsRef<Path>>(
    path: P,
    kinds: &HashMap<String, ColumnKind>,
) -> Result<Dataset> {
    read_delimited(path, Format::Csv, kinds)
}

/// Load a delimited file into a dataset.
pub fn read_delimited<P: AsRef<Path>>(
    path: P,
    format: Format,
    kinds: &HashMap<String, ColumnKind>,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .from_path(path.as_ref())?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DqError::EmptyData(format!(
            "no header row in {:?}",
            path.as_ref()
        )));
    }

    // Column-major accumulation; ragged records surface as csv errors.
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            if idx < headers.len() {
                cells[idx].push(field.trim().to_string());
            }
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        let kind = kinds
            .get(name)
            .copied()
            .unwrap_or_else(|| infer_kind(&cells[idx]));
        let mut values = Vec::with_capacity(cells[idx].len());
        for (row, raw) in cells[idx].iter().enumerate() {
            values.push(parse_value(name, kind, raw, row)?);
        }
        columns.push(Column::new(name.clone(), kind, values)?);
    }

    Dataset::new(columns)
}

fn is_missing_token(raw: &str) -> bool {
    raw.is_empty() || raw == "NA" || raw == "na"
}

// An all-missing column is vacuously numeric.
fn infer_kind(cells: &[String]) -> ColumnKind {
    let all_numeric = cells
        .iter()
        .all(|c| is_missing_token(c) || c.parse::<f64>().is_ok());
    if all_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

fn parse_value(column: &str, kind: ColumnKind, raw: &str, row: usize) -> Result<Value> {
    if is_missing_token(raw) {
        return Ok(Value::Missing);
    }
    match kind {
        ColumnKind::Numeric => {
            raw.parse::<f64>()
                .map(Value::Number)
                .map_err(|_| DqError::InvalidValue {
                    column: column.to_string(),
                    value: raw.to_string(),
                    row,
                    kind: kind.as_str(),
                })
        }
        ColumnKind::Text => Ok(Value::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_csv_infers_kinds() {
        let file = write_csv("id,name,score\n1,alice,9.5\n2,bob,8.0\n3,carol,NA\n");
        let ds = read_csv(file.path()).unwrap();

        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_columns(), 3);
        assert_eq!(ds.column("id").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(ds.column("name").unwrap().kind(), ColumnKind::Text);
        assert_eq!(ds.column("score").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(ds.column("score").unwrap().null_count(), 1);
    }

    #[test]
    fn test_missing_tokens() {
        let file = write_csv("a,b\n,x\nNA,y\nna,\n");
        let ds = read_csv(file.path()).unwrap();
        assert_eq!(ds.column("a").unwrap().null_count(), 3);
        assert_eq!(ds.column("b").unwrap().null_count(), 1);
    }

    #[test]
    fn test_kind_override_fails_fast() {
        let file = write_csv("a\n1\ntwo\n");
        let mut kinds = HashMap::new();
        kinds.insert("a".to_string(), ColumnKind::Numeric);
        let err = read_csv_with_kinds(file.path(), &kinds).unwrap_err();
        match err {
            DqError::InvalidValue { column, value, row, .. } => {
                assert_eq!(column, "a");
                assert_eq!(value, "two");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_kind_override_to_text() {
        let file = write_csv("zip\n01234\n98765\n");
        let mut kinds = HashMap::new();
        kinds.insert("zip".to_string(), ColumnKind::Text);
        let ds = read_csv_with_kinds(file.path(), &kinds).unwrap();
        assert_eq!(ds.column("zip").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let file = write_csv("a,b\n");
        let ds = read_csv(file.path()).unwrap();
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.n_columns(), 2);
    }

    #[test]
    fn test_tsv() {
        let file = write_csv("a\tb\n1\tx\n");
        let ds = read_tsv(file.path()).unwrap();
        assert_eq!(ds.n_rows(), 1);
        assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Numeric);
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(Format::from_path(Path::new("data.csv")).unwrap(), Format::Csv);
        assert_eq!(Format::from_path(Path::new("data.tsv")).unwrap(), Format::Tsv);
        assert!(Format::from_path(Path::new("data.parquet")).is_err());
        assert!(Format::from_path(Path::new("data")).is_err());
    }
}
