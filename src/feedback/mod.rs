//! Human feedback on suggested rules.
//!
//! The store is constructed explicitly and passed to callers; there is no
//! process-wide handle. `accepted` is stored as INTEGER 0/1 and surfaced
//! as `bool`.

use crate::error::Result;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One piece of feedback on a suggested rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Row id, assigned by the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The rule expression the feedback refers to.
    pub rule: String,
    /// Whether the rule was accepted.
    pub accepted: bool,
    /// Free-form comment.
    pub comment: String,
    /// RFC 3339 timestamp of when the feedback was recorded.
    pub recorded_at: String,
}

impl FeedbackRecord {
    /// Create an unsaved record stamped with the current time.
    pub fn new(rule: impl Into<String>, accepted: bool, comment: impl Into<String>) -> Self {
        Self {
            id: None,
            rule: rule.into(),
            accepted,
            comment: comment.into(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// SQLite-backed feedback store with an explicit open/close lifecycle.
#[derive(Debug)]
pub struct FeedbackStore {
    conn: Connection,
}

impl FeedbackStore {
    /// Open (creating if needed) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS feedback (
               id INTEGER PRIMARY KEY,
               rule TEXT NOT NULL,
               accepted INTEGER NOT NULL,
               comment TEXT NOT NULL,
               recorded_at TEXT NOT NULL
             );",
        )?;
        Ok(Self { conn })
    }

    /// Insert a record, returning its assigned id.
    pub fn add(&self, record: &FeedbackRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO feedback (rule, accepted, comment, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.rule,
                record.accepted as i64,
                record.comment,
                record.recorded_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All records in insertion order.
    pub fn list(&self) -> Result<Vec<FeedbackRecord>> {
        self.query("SELECT id, rule, accepted, comment, recorded_at FROM feedback ORDER BY id")
    }

    /// Records marked accepted.
    pub fn accepted(&self) -> Result<Vec<FeedbackRecord>> {
        self.query(
            "SELECT id, rule, accepted, comment, recorded_at FROM feedback
             WHERE accepted = 1 ORDER BY id",
        )
    }

    /// Records marked rejected.
    pub fn rejected(&self) -> Result<Vec<FeedbackRecord>> {
        self.query(
            "SELECT id, rule, accepted, comment, recorded_at FROM feedback
             WHERE accepted = 0 ORDER BY id",
        )
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn query(&self, sql: &str) -> Result<Vec<FeedbackRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(FeedbackRecord {
                id: Some(row.get(0)?),
                rule: row.get(1)?,
                accepted: row.get::<_, i64>(2)? != 0,
                comment: row.get(3)?,
                recorded_at: row.get(4)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Close the store, surfacing any flush error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}
