//! Persistence for validated rules.

use crate::error::Result;
use crate::rules::Rule;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only file store for validated rule expressions, one per line.
///
/// Constructed explicitly with its backing path; a store whose file does
/// not exist yet loads as empty.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    /// Create a store backed by the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one rule expression.
    pub fn store(&self, expression: &str) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", expression)?;
        writer.flush()?;
        Ok(())
    }

    /// Append a suggested rule's expression.
    pub fn store_rule(&self, rule: &Rule) -> Result<()> {
        self.store(&rule.expression)
    }

    /// Load all stored expressions, skipping blank lines.
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }
}
