//! Data Quality Agent core library.
//!
//! This library profiles tabular datasets, screens numeric columns for
//! outliers, suggests validation rules, and records human feedback on
//! those rules.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (Value, Column, Dataset)
//! - **ingest**: Delimited-text ingestion with column-kind inference
//! - **profile**: Per-column statistics and shape classification
//! - **anomaly**: Numeric outlier screening (fit / score / detect)
//! - **rules**: Rule model, heuristic and model-backed suggestion,
//!   validated-rule persistence
//! - **feedback**: Accept/reject feedback storage
//!
//! # Example
//!
//! ```no_run
//! use dq_agent::prelude::*;
//!
//! // Load and profile a dataset
//! let dataset = read_csv("orders.csv").unwrap();
//! let profile = profile(&dataset);
//! println!("{}", profile);
//!
//! // Suggest validation rules and record a decision
//! let rules = HeuristicSuggester::new().suggest(&profile).unwrap();
//! let store = FeedbackStore::open("feedback.db").unwrap();
//! store
//!     .add(&FeedbackRecord::new(&rules[0].expression, true, ""))
//!     .unwrap();
//! ```

pub mod anomaly;
pub mod data;
pub mod error;
pub mod feedback;
pub mod ingest;
pub mod profile;
pub mod rules;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::anomaly::{AnomalyDetector, ColumnStats, FittedDetector, RowScore};
    pub use crate::data::{Column, ColumnKind, Dataset, Value};
    pub use crate::error::{DqError, Result};
    pub use crate::feedback::{FeedbackRecord, FeedbackStore};
    pub use crate::ingest::{
        read_csv, read_csv_with_kinds, read_dataset, read_delimited, read_tsv, Format,
    };
    pub use crate::profile::{detect_shape, profile, ColumnProfile, DatasetProfile, ShapePattern};
    pub use crate::rules::{
        render_prompt, CompletionClient, HeuristicSuggester, LlmSuggester, Rule, RuleKind,
        RuleStore, RuleSuggester, UnavailableClient, DATASET_WIDE,
    };
}
